use std::fmt;

use crate::http::request::{negotiate_keep_alive, Method, Request, Version};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The request line is not `METHOD SP TARGET SP VERSION`. Carries the
    /// version token when one could still be recognised at the end of the
    /// line, and whether the connection may be kept for that version.
    InvalidRequestLine {
        version: Option<Version>,
        keep_alive: bool,
    },
}

impl ParseError {
    pub fn recovered_version(&self) -> Option<Version> {
        match self {
            ParseError::InvalidRequestLine { version, .. } => *version,
        }
    }

    pub fn keep_alive(&self) -> bool {
        match self {
            ParseError::InvalidRequestLine { keep_alive, .. } => *keep_alive,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidRequestLine { .. } => f.write_str("invalid request line"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a request head (everything before the blank line).
///
/// The target is not decoded or checked in any way. Header lines without a
/// colon are skipped.
pub fn parse_http_request(head: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(head);

    let line_end = text.find(['\r', '\n']).unwrap_or(text.len());
    let headers: Vec<(String, String)> = text[line_end..]
        .split('\n')
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect();

    let (method, path, version) = match split_request_line(&text[..line_end]) {
        Ok(parts) => parts,
        Err(version) => {
            let connection = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("Connection"))
                .map(|(_, v)| v.as_str());
            return Err(ParseError::InvalidRequestLine {
                version,
                keep_alive: negotiate_keep_alive(version, connection),
            });
        }
    };

    Ok(Request {
        method: Method::from_token(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
    })
}

/// Splits the request line, or returns whatever version token ends it.
fn split_request_line(line: &str) -> Result<(&str, &str, &str), Option<Version>> {
    let parts: Vec<&str> = line.split(' ').collect();

    match parts.as_slice() {
        [method, path, version]
            if !method.is_empty() && !path.is_empty() && !version.is_empty() =>
        {
            Ok((*method, *path, *version))
        }
        _ => Err(parts.last().and_then(|v| Version::from_token(v))),
    }
}
