use std::fmt;
use std::io;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";
const READ_CHUNK: usize = 1024;

/// Why no request head could be read.
#[derive(Debug)]
pub enum ReadError {
    /// No bytes arrived within the idle window.
    Timeout,
    /// The peer closed its end.
    ConnectionClosed,
    /// The size limit was reached before the blank line.
    HeaderTooLarge,
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Timeout => f.write_str("receive timed out"),
            ReadError::ConnectionClosed => f.write_str("connection closed by peer"),
            ReadError::HeaderTooLarge => f.write_str("request head exceeds size limit"),
            ReadError::Io(e) => write!(f, "receive failed: {}", e),
        }
    }
}

impl std::error::Error for ReadError {}

/// Accumulates request bytes up to a fixed limit.
///
/// The buffer grows on demand but never holds more than `limit` bytes.
#[derive(Debug)]
pub struct RequestBuffer {
    buf: BytesMut,
    limit: usize,
}

impl RequestBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(limit.min(READ_CHUNK)),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes that may still be appended.
    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Appends as much of `data` as fits and returns the number of bytes taken.
    pub fn append(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.remaining());
        self.buf.extend_from_slice(&data[..n]);
        n
    }

    /// Offset of the `\r\n\r\n` terminator, if it has arrived.
    pub fn head_end(&self) -> Option<usize> {
        self.buf
            .windows(HEAD_TERMINATOR.len())
            .position(|w| w == HEAD_TERMINATOR)
    }

    /// Consumes the buffer and returns the head without its terminator.
    /// Anything after the terminator is discarded.
    pub fn into_head(mut self) -> Option<Bytes> {
        let end = self.head_end()?;
        self.buf.truncate(end);
        Some(self.buf.freeze())
    }
}

/// Reads one request head from `stream`.
///
/// Every receive is bounded by `idle_timeout`. Bytes pipelined after the
/// blank line are dropped.
pub async fn read_request<S>(
    stream: &mut S,
    limit: usize,
    idle_timeout: Duration,
) -> Result<Bytes, ReadError>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = RequestBuffer::new(limit);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        if buffer.head_end().is_some() {
            return buffer.into_head().ok_or(ReadError::HeaderTooLarge);
        }
        if buffer.is_full() {
            return Err(ReadError::HeaderTooLarge);
        }

        let want = buffer.remaining().min(chunk.len());
        let n = match timeout(idle_timeout, stream.read(&mut chunk[..want])).await {
            Err(_) => return Err(ReadError::Timeout),
            Ok(Ok(0)) => return Err(ReadError::ConnectionClosed),
            Ok(Ok(n)) => n,
            Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
            Ok(Err(e)) => return Err(ReadError::Io(e)),
        };

        buffer.append(&chunk[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_stops_at_limit() {
        let mut buf = RequestBuffer::new(8);

        assert_eq!(buf.append(b"GET / HTTP/1.1"), 8);
        assert!(buf.is_full());
        assert_eq!(buf.append(b"x"), 0);
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn into_head_drops_trailing_bytes() {
        let mut buf = RequestBuffer::new(64);
        buf.append(b"GET / HTTP/1.1\r\n\r\nGET /next HTTP/1.1\r\n\r\n");

        let head = buf.into_head().unwrap();
        assert_eq!(&head[..], b"GET / HTTP/1.1");
    }
}
