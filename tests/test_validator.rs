use tinyhttpd::http::parser::parse_http_request;
use tinyhttpd::http::request::Version;
use tinyhttpd::http::response::StatusCode;
use tinyhttpd::http::validator::{Rejection, validate};

fn check(head: &[u8]) -> Result<Version, Rejection> {
    validate(parse_http_request(head)).map(|valid| valid.version)
}

#[test]
fn test_valid_get_requests() {
    assert_eq!(check(b"GET / HTTP/1.1"), Ok(Version::Http11));
    assert_eq!(check(b"GET /a.txt HTTP/1.0"), Ok(Version::Http10));
}

#[test]
fn test_parse_failure_is_bad_request() {
    let rejection = check(b"GET /").unwrap_err();

    assert_eq!(rejection.status, StatusCode::BadRequest);
    assert_eq!(rejection.version, Version::Http11);
    assert!(!rejection.keep_alive);
}

#[test]
fn test_bad_request_uses_recovered_version() {
    let rejection = check(b"GET  /x HTTP/1.0\r\nConnection: keep-alive").unwrap_err();

    assert_eq!(rejection.status, StatusCode::BadRequest);
    assert_eq!(rejection.version, Version::Http10);
    assert!(rejection.keep_alive);
}

#[test]
fn test_non_get_methods_are_405() {
    for method in ["POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH", "BREW", "get"] {
        let head = format!("{} /index.html HTTP/1.1", method);
        let rejection = check(head.as_bytes()).unwrap_err();
        assert_eq!(rejection.status, StatusCode::MethodNotAllowed, "{}", method);
    }
}

#[test]
fn test_method_checked_before_version() {
    let rejection = check(b"POST / HTTP/3.0").unwrap_err();

    assert_eq!(rejection.status, StatusCode::MethodNotAllowed);
    assert_eq!(rejection.version, Version::Http11);
    assert!(!rejection.keep_alive);
}

#[test]
fn test_405_follows_keep_alive_rule() {
    assert!(check(b"POST / HTTP/1.1").unwrap_err().keep_alive);
    assert!(!check(b"POST / HTTP/1.1\r\nConnection: close").unwrap_err().keep_alive);
    assert!(!check(b"POST / HTTP/1.0").unwrap_err().keep_alive);

    let rejection = check(b"POST / HTTP/1.0").unwrap_err();
    assert_eq!(rejection.version, Version::Http10);
}

#[test]
fn test_unsupported_versions_are_505() {
    for version in ["HTTP/2.0", "HTTP/0.9", "HTTP/1.2", "http/1.1", "FOO"] {
        let head = format!("GET / {}", version);
        let rejection = check(head.as_bytes()).unwrap_err();
        assert_eq!(rejection.status, StatusCode::HttpVersionNotSupported, "{}", version);
        assert_eq!(rejection.version, Version::Http11);
        assert!(!rejection.keep_alive);
    }
}

#[test]
fn test_header_too_large_closes() {
    let rejection = Rejection::header_too_large();

    assert_eq!(rejection.status, StatusCode::BadRequest);
    assert!(!rejection.keep_alive);
    assert_eq!(rejection.response().status, StatusCode::BadRequest);
}
