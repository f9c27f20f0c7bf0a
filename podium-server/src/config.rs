//! Server configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Podium HTTP server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "podium-server")]
#[command(about = "Podium leaderboard HTTP API server")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "PODIUM_LISTEN_ADDR", default_value = "0.0.0.0:3053")]
    pub listen_addr: SocketAddr,

    /// Base directory holding one subdirectory of shard files per world
    #[arg(long, env = "PODIUM_DATA_PATH", default_value = "./data")]
    pub data_path: PathBuf,

    /// Enable CORS (Cross-Origin Resource Sharing)
    #[arg(long, env = "PODIUM_CORS_ENABLED", default_value = "true")]
    pub cors_enabled: bool,

    /// Largest leaderboard page a single read may request
    #[arg(long, env = "PODIUM_TOP_LIMIT_MAX", default_value = "100")]
    pub top_limit_max: usize,

    /// Fallback log level when RUST_LOG is not set
    #[arg(long, env = "PODIUM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3053".parse().expect("valid default listen addr"),
            data_path: PathBuf::from("./data"),
            cors_enabled: true,
            top_limit_max: 100,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_cli_defaults() {
        let parsed = ServerConfig::parse_from(["podium-server"]);
        let defaults = ServerConfig::default();
        assert_eq!(parsed.listen_addr, defaults.listen_addr);
        assert_eq!(parsed.data_path, defaults.data_path);
        assert_eq!(parsed.top_limit_max, defaults.top_limit_max);
    }
}
