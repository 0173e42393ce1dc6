use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_ENV: &str = "TINYHTTPD_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listening socket binds to. The port comes from the command line.
    pub bind_addr: IpAddr,
    pub backlog: u32,
    /// Seconds a connection may sit idle waiting for request bytes.
    pub idle_timeout_secs: u64,
    /// Upper bound on the request line plus headers, in bytes.
    pub max_header_size: usize,
    /// Caps concurrently served connections. `None` spawns one task per
    /// connection without limit.
    pub max_connections: Option<usize>,
    /// Seconds to wait for in-flight responses after a shutdown signal.
    pub shutdown_grace_secs: u64,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    /// Document served for the target `/`.
    pub index: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            backlog: 8,
            idle_timeout_secs: 10,
            max_header_size: 512,
            max_connections: None,
            shutdown_grace_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./www"),
            index: "index.html".to_string(),
        }
    }
}

impl Config {
    /// Loads the file named by `TINYHTTPD_CONFIG`, or the defaults when the
    /// variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        if cfg.server.max_header_size < 4 {
            anyhow::bail!("server.max_header_size must be at least 4 bytes");
        }
        if cfg.server.idle_timeout_secs == 0 {
            anyhow::bail!("server.idle_timeout_secs must be positive");
        }
        if cfg.server.max_connections == Some(0) {
            anyhow::bail!("server.max_connections must be positive");
        }
        Ok(cfg)
    }
}
