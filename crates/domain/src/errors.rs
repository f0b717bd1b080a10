//! Error types used throughout the workspace
//!
//! The retry loop itself never fails: the outcome of a test is carried by the
//! test handle and `RetryOutcome`. These errors cover the adapters around it
//! (configuration loading, input parsing).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Rebound
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ReboundError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ReboundError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for Rebound operations
pub type Result<T> = std::result::Result<T, ReboundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = ReboundError::Config("REBOUND_VERBOSE_RETRY: expected a boolean".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: REBOUND_VERBOSE_RETRY: expected a boolean"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "rebound.toml missing");
        let err: ReboundError = io.into();
        assert!(matches!(err, ReboundError::Io(ref msg) if msg.contains("rebound.toml")));
    }

    #[test]
    fn test_serialized_shape() {
        let err = ReboundError::InvalidInput("retry".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"InvalidInput","message":"retry"}"#);
    }
}
