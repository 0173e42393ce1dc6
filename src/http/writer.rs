use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    let status_line = format!(
        "{} {} {}\r\n",
        resp.version.as_str(),
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes a response: the serialized head first, then the body.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
        }
    }

    /// Sends the whole response and returns the number of body bytes written.
    ///
    /// File bodies are streamed. A file that yields fewer bytes than its
    /// announced length is an error, since the client has already been
    /// promised that many.
    pub async fn write_to_stream<S>(self, stream: &mut S) -> anyhow::Result<u64>
    where
        S: AsyncWrite + Unpin,
    {
        stream
            .write_all(&self.head)
            .await
            .context("failed to send response head")?;

        let sent = match self.body {
            Body::Bytes(bytes) => {
                stream
                    .write_all(&bytes)
                    .await
                    .context("failed to send response body")?;
                bytes.len() as u64
            }
            Body::File { file, len } => {
                let copied = tokio::io::copy(&mut file.take(len), stream)
                    .await
                    .context("failed to stream file body")?;
                if copied != len {
                    anyhow::bail!("file truncated while sending: {} of {} bytes", copied, len);
                }
                copied
            }
        };

        stream.flush().await.context("failed to flush response")?;
        Ok(sent)
    }
}
