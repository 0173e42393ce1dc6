use clap::error::ErrorKind;
use clap::Parser;

/// Serve files from the document root over HTTP/1.x.
#[derive(Debug, Parser)]
#[command(name = "tinyhttpd", version)]
pub struct Cli {
    /// TCP port to listen on
    pub port: u16,
}

/// Exit code for a command line that could not be used.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Exit code for a rejected command line. `--help` and `--version` are not
/// failures.
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}
