use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{info, warn, Instrument};

use crate::http::connection::{Connection, Settings};
use crate::server::executor::Executor;
use crate::server::shutdown::{Inflight, Shutdown};
use crate::server::SetupError;

/// Pause after a failed accept so a persistent error (e.g. EMFILE) does not
/// turn the loop into a busy spin.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Source of incoming connections.
pub trait Accept: Send + 'static {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn accept(&mut self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;
}

impl Accept for TcpListener {
    type Stream = TcpStream;

    fn accept(&mut self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        TcpListener::accept(self)
    }
}

/// Creates, binds and listens, reporting which step failed.
pub fn bind(addr: SocketAddr, backlog: u32) -> Result<TcpListener, SetupError> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(SetupError::Socket)?;

    socket
        .set_reuseaddr(true)
        .map_err(SetupError::Socket)?;
    socket
        .bind(addr)
        .map_err(|e| SetupError::Bind(addr, e))?;
    socket.listen(backlog).map_err(SetupError::Listen)
}

/// Accepts connections until shutdown is signalled, then waits for the
/// handlers already running.
///
/// Accept failures are logged and retried after [`ACCEPT_BACKOFF`]. The
/// listening socket is closed as soon as shutdown fires. Idle handlers see the
/// same signal and close; a handler in the middle of a response finishes it.
/// Handlers still running after `settings.drain_timeout` are abandoned.
pub async fn run<L: Accept, E: Executor>(
    mut listener: L,
    settings: Arc<Settings>,
    executor: E,
    mut shutdown: Shutdown,
) where
    L::Stream: Sync,
{
    let inflight = Inflight::new();

    loop {
        let (socket, peer) = tokio::select! {
            res = listener.accept() => match res {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            },
            _ = shutdown.recv() => break,
        };
        info!("Accepted connection from {}", peer);

        let settings = settings.clone();
        let conn_shutdown = shutdown.clone();
        let guard = inflight.guard();
        let span = tracing::info_span!("conn", %peer);
        let task = async move {
            let _guard = guard;
            let mut conn = Connection::new(socket, settings, conn_shutdown);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        }
        .instrument(span);

        // A bounded executor may hold us here; shutdown drops the waiting connection.
        tokio::select! {
            _ = executor.execute(task) => {}
            _ = shutdown.recv() => break,
        }
    }

    drop(listener);
    info!("Listener stopped");

    match tokio::time::timeout(settings.drain_timeout, inflight.wait()).await {
        Ok(()) => info!("All connections closed"),
        Err(_) => warn!(
            grace_secs = settings.drain_timeout.as_secs(),
            "Connections still open after grace period"
        ),
    }
}
