use tokio::fs::File;

use crate::http::request::Version;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed request line or oversized head
/// - `Forbidden` (403): File not readable, or outside the document root
/// - `NotFound` (404): No such file
/// - `MethodNotAllowed` (405): Anything but GET
/// - `HttpVersionNotSupported` (505): Neither HTTP/1.0 nor HTTP/1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    /// The fixed plain-text body sent with an error status. `None` for 200.
    pub fn reason_body(&self) -> Option<&'static str> {
        match self {
            StatusCode::Ok => None,
            StatusCode::BadRequest => Some("400 Bad Request"),
            StatusCode::Forbidden => Some("403 Forbidden"),
            StatusCode::NotFound => Some("404 Not Found"),
            StatusCode::MethodNotAllowed => Some("405 Method Not Allowed: Only GET is supported"),
            StatusCode::HttpVersionNotSupported => Some("505 HTTP Version Not Supported"),
        }
    }
}

/// Response payload.
#[derive(Debug)]
pub enum Body {
    Bytes(Vec<u8>),
    /// An open file streamed to the client; `len` is the size announced in
    /// `Content-Length`.
    File { file: File, len: u64 },
}

impl Body {
    pub fn len(&self) -> u64 {
        match self {
            Body::Bytes(b) => b.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A complete HTTP response ready to be written.
///
/// Headers are kept in insertion order so they go out on the wire exactly
/// as built.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    /// Version echoed in the status line
    pub version: Version,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok, Version::Http11)
///     .header("Content-Type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    version: Version,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode, version: Version) -> Self {
        Self {
            status,
            version,
            headers: Vec::new(),
            body: Body::Bytes(Vec::new()),
        }
    }

    /// Adds or replaces a header. Replacing keeps the original position.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Body::Bytes(body);
        self
    }

    pub fn file(mut self, file: File, len: u64) -> Self {
        self.body = Body::File { file, len };
        self
    }

    /// Builds the final Response.
    ///
    /// Adds `Content-Length` from the body size unless it was set explicitly.
    pub fn build(self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-Length"));
        let builder = if has_length {
            self
        } else {
            let len = self.body.len();
            self.header("Content-Length", len.to_string())
        };

        Response {
            status: builder.status,
            version: builder.version,
            headers: builder.headers,
            body: builder.body,
        }
    }
}

impl Response {
    /// A 200 response streaming `file`.
    pub fn file(
        version: Version,
        file: File,
        len: u64,
        content_type: &str,
        keep_alive: bool,
    ) -> Self {
        ResponseBuilder::new(StatusCode::Ok, version)
            .header("Content-Type", content_type)
            .header("Content-Length", len.to_string())
            .header("Connection", if keep_alive { "Keep-alive" } else { "Close" })
            .file(file, len)
            .build()
    }

    /// An error response carrying the fixed reason body of `status`.
    pub fn error(status: StatusCode, version: Version) -> Self {
        let body = status.reason_body().unwrap_or_default();
        ResponseBuilder::new(status, version)
            .header("Content-Type", "text/plain")
            .header("Content-Length", body.len().to_string())
            .body(body.as_bytes().to_vec())
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
