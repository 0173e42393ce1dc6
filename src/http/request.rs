/// HTTP request methods.
///
/// Only `GET` is served. Every other token still parses so the validator can
/// answer it with 405 Method Not Allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token found in the method position
    Other(String),
}

impl Method {
    /// Parses an HTTP method from its request-line token.
    ///
    /// Matching is case-sensitive; unknown tokens become [`Method::Other`].
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttpd::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }
}

/// Protocol versions the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Version {
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(Version::Http10),
            "HTTP/1.1" => Some(Version::Http11),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

/// A parsed request head.
///
/// Holds the three request-line tokens and the header fields that followed
/// them. The version is kept verbatim for validation and keep-alive
/// negotiation; replies to an unsupported version are sent as HTTP/1.1.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, forwarded verbatim (e.g. "/index.html")
    pub path: String,
    /// Version token as sent (e.g. "HTTP/1.1")
    pub version: String,
    /// Header fields in arrival order
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// Returns the first matching field when a name is repeated.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Determines whether the connection should remain open after the response.
    pub fn keep_alive(&self) -> bool {
        negotiate_keep_alive(Version::from_token(&self.version), self.header("Connection"))
    }
}

/// Persistence rule shared by every response path.
///
/// HTTP/1.1 is persistent unless the client sends `Connection: close`.
/// HTTP/1.0 is persistent only with `Connection: keep-alive`. Without a
/// recognised version the connection is never kept.
pub fn negotiate_keep_alive(version: Option<Version>, connection: Option<&str>) -> bool {
    let has = |token: &str| {
        connection
            .map(|v| v.split(',').any(|t| t.trim().eq_ignore_ascii_case(token)))
            .unwrap_or(false)
    };

    match version {
        Some(Version::Http11) => !has("close"),
        Some(Version::Http10) => has("keep-alive"),
        None => false,
    }
}
