use crate::http::parser::ParseError;
use crate::http::request::{Method, Request, Version};
use crate::http::response::{Response, StatusCode};

/// A request that passed every check.
#[derive(Debug)]
pub struct ValidRequest {
    pub request: Request,
    pub version: Version,
}

/// A request answered with an error status instead of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: StatusCode,
    /// Version used in the status line.
    pub version: Version,
    pub keep_alive: bool,
}

impl Rejection {
    /// Rejection for a head that overflowed the size limit. The connection is
    /// not reused because the rest of the stream cannot be trusted.
    pub fn header_too_large() -> Self {
        Self {
            status: StatusCode::BadRequest,
            version: Version::Http11,
            keep_alive: false,
        }
    }

    pub fn response(&self) -> Response {
        Response::error(self.status, self.version)
    }
}

/// Applies the request rules in order: parse failure, method, version.
///
/// The status line of an error echoes the request's version when it is one
/// we speak and falls back to HTTP/1.1 otherwise, so it is always well formed.
pub fn validate(parsed: Result<Request, ParseError>) -> Result<ValidRequest, Rejection> {
    let request = match parsed {
        Ok(request) => request,
        Err(err) => {
            return Err(Rejection {
                status: StatusCode::BadRequest,
                version: err.recovered_version().unwrap_or(Version::Http11),
                keep_alive: err.keep_alive(),
            });
        }
    };

    let version = Version::from_token(&request.version);
    let keep_alive = request.keep_alive();
    let reject = |status: StatusCode| Rejection {
        status,
        version: version.unwrap_or(Version::Http11),
        keep_alive,
    };

    if request.method != Method::GET {
        return Err(reject(StatusCode::MethodNotAllowed));
    }

    match version {
        Some(version) => Ok(ValidRequest { request, version }),
        None => Err(reject(StatusCode::HttpVersionNotSupported)),
    }
}
