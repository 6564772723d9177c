//! Static server configuration

use crate::io::configuration::{DEFAULT_ASSET_DIR, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SHELL_PATH};
use clap::Args;
use std::path::PathBuf;

/// Where and what the static server serves
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory served under /assets
    #[arg(long, env = "ASSET_DIR", default_value = DEFAULT_ASSET_DIR)]
    pub asset_dir: PathBuf,

    /// Application shell returned for every other path
    #[arg(long, env = "APP_SHELL", default_value = DEFAULT_SHELL_PATH)]
    pub shell: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            shell: PathBuf::from(DEFAULT_SHELL_PATH),
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
