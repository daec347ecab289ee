//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{ClientConfig, DEFAULT_LOG_FILE, DEFAULT_SERVER_URL};
use crate::error::ConfigError;

/// Tic-tac-toe against a remote move resolver
#[derive(Parser, Debug)]
#[command(name = "tictactoe_client")]
#[command(about = "Play tic-tac-toe against a remote move resolver", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Resolver base URL
    #[arg(long, env = "TICTACTOE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// File that receives log output
    #[arg(long, env = "TICTACTOE_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Request timeout in seconds (waits indefinitely when omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Validates the arguments into a client configuration.
    pub fn into_config(self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::new(
            self.server_url,
            self.log_file,
            self.timeout_secs.map(Duration::from_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tictactoe_client"]).unwrap();
        assert_eq!(cli.timeout_secs, None);
        let config = cli.into_config().unwrap();
        assert_eq!(config.timeout(), &None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "tictactoe_client",
            "--server-url",
            "http://example.test:8080/",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.server_url(), "http://example.test:8080");
        assert_eq!(config.timeout(), &Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_bad_url_is_config_error() {
        let cli = Cli::try_parse_from(["tictactoe_client", "--server-url", "nope"]).unwrap();
        assert!(cli.into_config().is_err());
    }
}
