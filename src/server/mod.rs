//! Listening socket, connection scheduling and shutdown.

pub mod executor;
pub mod listener;
pub mod shutdown;

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::http::connection::Settings;
use executor::{Bounded, Unbounded};
use shutdown::Shutdown;

/// Failure to set up the listening socket. Each step has its own exit code.
#[derive(Debug)]
pub enum SetupError {
    Socket(io::Error),
    Bind(SocketAddr, io::Error),
    Listen(io::Error),
}

impl SetupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::Socket(_) => 2,
            SetupError::Bind(..) => 3,
            SetupError::Listen(_) => 4,
        }
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Socket(e) => write!(f, "could not create socket: {}", e),
            SetupError::Bind(addr, e) => write!(f, "bind to {} failed: {}", addr, e),
            SetupError::Listen(e) => write!(f, "listen failed: {}", e),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Socket(e) | SetupError::Bind(_, e) | SetupError::Listen(e) => Some(e),
        }
    }
}

/// Binds `port` and serves until `shutdown` fires and running handlers
/// have finished.
pub async fn run(cfg: &Config, port: u16, shutdown: Shutdown) -> Result<(), SetupError> {
    let addr = SocketAddr::new(cfg.server.bind_addr, port);
    let listener = listener::bind(addr, cfg.server.backlog)?;
    if let Ok(local) = listener.local_addr() {
        tracing::info!("Listening on {}", local);
    }
    let settings = Arc::new(Settings::from_config(cfg));

    match cfg.server.max_connections {
        Some(limit) => {
            tracing::info!(limit, "Connection limit in effect");
            listener::run(listener, settings, Bounded::new(limit), shutdown).await
        }
        None => listener::run(listener, settings, Unbounded, shutdown).await,
    }

    Ok(())
}
