use clap::Parser;
use tinyhttpd::cli::{Cli, USAGE_EXIT_CODE, exit_code};

#[test]
fn test_cli_port() {
    let cli = Cli::try_parse_from(["tinyhttpd", "8080"]).unwrap();

    assert_eq!(cli.port, 8080);
}

#[test]
fn test_cli_missing_port() {
    let err = Cli::try_parse_from(["tinyhttpd"]).unwrap_err();

    assert_eq!(exit_code(&err), USAGE_EXIT_CODE);
}

#[test]
fn test_cli_invalid_port() {
    for arg in ["http", "70000", "-1"] {
        let err = Cli::try_parse_from(["tinyhttpd", arg]).unwrap_err();
        assert_eq!(exit_code(&err), USAGE_EXIT_CODE, "{}", arg);
    }
}

#[test]
fn test_cli_extra_argument() {
    let err = Cli::try_parse_from(["tinyhttpd", "8080", "9090"]).unwrap_err();

    assert_eq!(exit_code(&err), USAGE_EXIT_CODE);
}

#[test]
fn test_cli_help_is_not_an_error() {
    let err = Cli::try_parse_from(["tinyhttpd", "--help"]).unwrap_err();

    assert_eq!(exit_code(&err), 0);
}
