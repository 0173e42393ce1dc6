//! tinyhttpd - a small static file server
//!
//! Serves files from a document root over HTTP/1.0 and HTTP/1.1 with
//! keep-alive support.

pub mod cli;
pub mod config;
pub mod docroot;
pub mod http;
pub mod server;
