//! Error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong talking to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ResolverErrorKind {
    /// The request never produced a response.
    #[display("transport failure: {}", _0)]
    Transport(String),
    /// Non-success HTTP status without a recognizable error body.
    #[display("resolver returned HTTP {}", _0)]
    Status(u16),
    /// The resolver refused the move (e.g. occupied cell).
    #[display("resolver rejected the move: {}", _0)]
    Rejected(String),
    /// The response body did not match the expected shape.
    #[display("malformed resolver response: {}", _0)]
    MalformedResponse(String),
    /// A move index outside the board.
    #[display("cell {} is not on the board", _0)]
    InvalidCell(usize),
}

/// Resolver error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Resolver error: {} at {}:{}", kind, file, line)]
pub struct ResolverError {
    /// Error category.
    pub kind: ResolverErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ResolverError {
    /// Creates a new resolver error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ResolverErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &ResolverErrorKind {
        &self.kind
    }
}

impl From<reqwest::Error> for ResolverError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(ResolverErrorKind::Transport(err.to_string()))
    }
}

impl From<serde_json::Error> for ResolverError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ResolverErrorKind::MalformedResponse(err.to_string()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_caller_location() {
        let err = ResolverError::new(ResolverErrorKind::Status(503));
        assert!(err.file.ends_with("error.rs"));
        assert!(err.line > 0);
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_json_error_maps_to_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ResolverError::from(json_err);
        assert!(matches!(err.kind(), ResolverErrorKind::MalformedResponse(_)));
    }
}
