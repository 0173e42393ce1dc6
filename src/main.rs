use std::process;

use clap::Parser;
use tinyhttpd::cli::{self, Cli};
use tinyhttpd::config::Config;
use tinyhttpd::server::{self, shutdown};
use tracing::Level;

#[tokio::main]
async fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            process::exit(cli::exit_code(&e));
        }
    };

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(cli::USAGE_EXIT_CODE);
        }
    };

    let level = cfg.server.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();

    let (trigger, shutdown) = shutdown::channel();
    tokio::spawn(async move {
        match shutdown::wait_for_signal().await {
            Ok(name) => tracing::info!(signal = name, "Shutdown signal received"),
            Err(e) => {
                tracing::error!("Failed to install signal handlers: {}", e);
                return;
            }
        }
        trigger.trigger();
    });

    if let Err(e) = server::run(&cfg, args.port, shutdown).await {
        tracing::error!("{}", e);
        process::exit(e.exit_code());
    }

    tracing::info!("Server shutting down");
}
