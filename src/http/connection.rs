use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::Config;
use crate::docroot::DocumentRoot;
use crate::http::mime;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::reader::{read_request, ReadError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::validator::{validate, Rejection, ValidRequest};
use crate::http::writer::ResponseWriter;
use crate::server::shutdown::Shutdown;

/// Read-only settings shared by every connection.
#[derive(Debug, Clone)]
pub struct Settings {
    pub idle_timeout: Duration,
    pub max_header_size: usize,
    /// How long the listener waits for running handlers after shutdown.
    pub drain_timeout: Duration,
    pub docroot: DocumentRoot,
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            idle_timeout: cfg.server.idle_timeout(),
            max_header_size: cfg.server.max_header_size,
            drain_timeout: cfg.server.shutdown_grace(),
            docroot: DocumentRoot::from_config(&cfg.static_files),
        }
    }
}

pub struct Connection<S> {
    stream: S,
    settings: Arc<Settings>,
    shutdown: Shutdown,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitRequest,
    Parsed(Result<Request, ParseError>),
    Validated(Result<ValidRequest, Rejection>),
    Responding(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, settings: Arc<Settings>, shutdown: Shutdown) -> Self {
        Self {
            stream,
            settings,
            shutdown,
            state: ConnectionState::AwaitRequest,
        }
    }

    /// Serves requests until the connection closes.
    ///
    /// Returns an error only when sending a response fails; timeouts and a
    /// peer hanging up are ordinary ways for a connection to end.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitRequest => match self.read_head().await {
                    Some(Ok(head)) => ConnectionState::Parsed(parse_http_request(&head)),
                    Some(Err(ReadError::HeaderTooLarge)) => {
                        ConnectionState::Validated(Err(Rejection::header_too_large()))
                    }
                    Some(Err(e)) => {
                        debug!(reason = %e, "Closing connection");
                        ConnectionState::Closed
                    }
                    None => {
                        debug!("Closing idle connection for shutdown");
                        ConnectionState::Closed
                    }
                },

                ConnectionState::Parsed(parsed) => ConnectionState::Validated(validate(parsed)),

                ConnectionState::Validated(Err(rejection)) => {
                    info!(
                        status = rejection.status.as_u16(),
                        keep_alive = rejection.keep_alive,
                        "Request rejected"
                    );
                    ConnectionState::Responding(
                        ResponseWriter::new(rejection.response()),
                        rejection.keep_alive,
                    )
                }

                ConnectionState::Validated(Ok(valid)) => {
                    let (response, keep_alive) = self.respond(valid).await;
                    ConnectionState::Responding(ResponseWriter::new(response), keep_alive)
                }

                ConnectionState::Responding(writer, keep_alive) => {
                    let sent = writer.write_to_stream(&mut self.stream).await?;
                    debug!(bytes = sent, keep_alive, "Response sent");

                    if keep_alive {
                        ConnectionState::AwaitRequest
                    } else {
                        ConnectionState::Closed
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        // The stream itself is closed when the connection is dropped.
        let _ = self.stream.shutdown().await;
        Ok(())
    }

    /// Waits for the next request head. `None` means shutdown was signalled
    /// while the connection was idle.
    async fn read_head(&mut self) -> Option<Result<Bytes, ReadError>> {
        let limit = self.settings.max_header_size;
        let idle = self.settings.idle_timeout;

        tokio::select! {
            res = read_request(&mut self.stream, limit, idle) => Some(res),
            _ = self.shutdown.recv() => None,
        }
    }

    async fn respond(&self, valid: ValidRequest) -> (Response, bool) {
        let ValidRequest { request, version } = valid;
        let keep_alive = request.keep_alive();

        let response = match self.settings.docroot.open(&request.path).await {
            Ok(opened) => {
                let content_type = mime::content_type(&opened.path);
                Response::file(version, opened.file, opened.len, content_type, keep_alive)
            }
            Err(status) => Response::error(status, version),
        };

        info!(
            method = request.method.as_str(),
            path = %request.path,
            version = version.as_str(),
            status = response.status.as_u16(),
            bytes = response.body.len(),
            keep_alive,
            "Request served"
        );

        (response, keep_alive)
    }
}
