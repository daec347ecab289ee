//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use derive_getters::Getters;
use reqwest::Url;
use tracing::{debug, instrument};

use crate::error::ConfigError;

/// Loopback address the resolver listens on by default.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Default log file; the terminal belongs to the UI.
pub const DEFAULT_LOG_FILE: &str = "tictactoe_client.log";

/// Validated settings for a client run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ClientConfig {
    /// Resolver base URL without a trailing slash.
    server_url: String,
    /// Where tracing output goes.
    log_file: PathBuf,
    /// Per-request timeout. `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Validates and builds a configuration.
    #[instrument(skip(log_file))]
    pub fn new(
        server_url: impl Into<String> + std::fmt::Debug,
        log_file: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let server_url = normalize_url(server_url.into())?;
        if timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::new("request timeout must be greater than zero"));
        }
        let config = Self {
            server_url,
            log_file: log_file.into(),
            timeout,
        };
        debug!(?config, "Built client config");
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            timeout: None,
        }
    }
}

fn normalize_url(url: String) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::new(format!("invalid server URL {}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::new(format!(
            "server URL must use http or https: {}",
            url
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::new(format!("server URL has no host: {}", url)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_loopback() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.timeout(), &None);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://localhost:5000/", "x.log", None).unwrap();
        assert_eq!(config.server_url(), "http://localhost:5000");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(ClientConfig::new("ftp://localhost", "x.log", None).is_err());
        assert!(ClientConfig::new("localhost:5000", "x.log", None).is_err());
        assert!(ClientConfig::new("http://", "x.log", None).is_err());
    }

    #[test]
    fn test_rejects_unparseable_url() {
        for url in ["http://exa mple:5000", "http://:5000", "http://[::1", "https://host:99999"] {
            assert!(ClientConfig::new(url, "x.log", None).is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = ClientConfig::new(DEFAULT_SERVER_URL, "x.log", Some(Duration::ZERO));
        assert!(result.is_err());
    }
}
