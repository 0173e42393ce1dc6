//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.x server: only `GET` is served, request
//! bodies are never read, and every response is either a file or one of a
//! fixed set of plain-text errors.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection request/response state machine
//! - **`reader`**: Collects the request head from the stream, bounded in size and time
//! - **`parser`**: Splits the head into request line and header fields
//! - **`request`**: Request representation and keep-alive negotiation
//! - **`validator`**: Method and version rules, mapped to error statuses
//! - **`response`**: Status codes and response construction
//! - **`writer`**: Serializes and writes responses, streaming file bodies
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────┐
//!        │ AwaitRequest │ ← Wait for the request head
//!        └──────┬───────┘
//!               │ Head received       (timeout / EOF / error → Closed)
//!               ▼
//!        ┌──────────────┐
//!        │    Parsed    │ ← Request line split, or parse error
//!        └──────┬───────┘
//!               ▼
//!        ┌──────────────┐
//!        │  Validated   │ ← GET only, HTTP/1.0 or HTTP/1.1
//!        └──────┬───────┘
//!               │ File opened or error chosen
//!               ▼
//!        ┌──────────────┐
//!        │  Responding  │ ← Send status, headers and body
//!        └──────┬───────┘
//!               ├─ Keep-Alive → AwaitRequest (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tinyhttpd::config::Config;
//! use tinyhttpd::http::connection::{Connection, Settings};
//! use tinyhttpd::server::shutdown;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let settings = Arc::new(Settings::from_config(&Config::default()));
//!     let (_trigger, shutdown) = shutdown::channel();
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, settings.clone(), shutdown.clone());
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod validator;
pub mod writer;
