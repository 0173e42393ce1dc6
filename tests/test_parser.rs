use tinyhttpd::http::parser::{ParseError, parse_http_request};
use tinyhttpd::http::request::{Method, Version};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
    assert_eq!(parsed.headers.len(), 3);
}

#[test]
fn test_parse_target_is_opaque() {
    let req = b"GET /search%20me?q=rust#frag HTTP/1.1";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search%20me?q=rust#frag");
}

#[test]
fn test_parse_request_line_without_headers() {
    let parsed = parse_http_request(b"GET /index.html HTTP/1.0").unwrap();

    assert_eq!(parsed.version, "HTTP/1.0");
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_parse_bare_newlines() {
    let parsed = parse_http_request(b"GET / HTTP/1.1\nConnection: close").unwrap();

    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.header("connection"), Some("close"));
}

#[test]
fn test_parse_unknown_method_is_kept() {
    let parsed = parse_http_request(b"BREW /pot HTTP/1.1").unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
    assert_eq!(parsed.method.as_str(), "BREW");
}

#[test]
fn test_parse_unsupported_version_still_parses() {
    let parsed = parse_http_request(b"GET / HTTP/2.0").unwrap();

    assert_eq!(parsed.version, "HTTP/2.0");
}

#[test]
fn test_parse_empty_line_fails() {
    let err = parse_http_request(b"").unwrap_err();

    assert_eq!(
        err,
        ParseError::InvalidRequestLine {
            version: None,
            keep_alive: false
        }
    );
}

#[test]
fn test_parse_two_tokens_fails() {
    let result = parse_http_request(b"GET /\r\nHost: x");

    assert!(matches!(
        result,
        Err(ParseError::InvalidRequestLine { version: None, .. })
    ));
}

#[test]
fn test_parse_four_tokens_fails_with_recovered_version() {
    let err = parse_http_request(b"GET /a b HTTP/1.1\r\nHost: x").unwrap_err();

    assert_eq!(err.recovered_version(), Some(Version::Http11));
    assert!(err.keep_alive());
}

#[test]
fn test_parse_failure_honours_connection_close() {
    let err = parse_http_request(b"GET  / HTTP/1.1\r\nConnection: close").unwrap_err();

    assert_eq!(err.recovered_version(), Some(Version::Http11));
    assert!(!err.keep_alive());
}

#[test]
fn test_parse_malformed_header_line_is_skipped() {
    let parsed = parse_http_request(b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: x").unwrap();

    assert_eq!(parsed.headers, vec![("Host".to_string(), "x".to_string())]);
}

#[test]
fn test_parse_header_value_with_colon() {
    let parsed = parse_http_request(b"GET / HTTP/1.1\r\nHost: localhost:8080").unwrap();

    assert_eq!(parsed.header("Host"), Some("localhost:8080"));
}
