//! Error types for matchgrab
//!
//! Every query failure falls into one of three classes: the requested match
//! is absent, a stored record failed to decode, or the store itself failed.

use thiserror::Error;

/// Common result type for matchgrab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for matchgrab
#[derive(Debug, Error)]
pub enum Error {
    #[error("match not found: {0}")]
    MatchNotFound(i64),

    #[error("corrupt record for match {match_id}: {reason}")]
    Decode { match_id: i64, reason: String },

    #[error("store error: {0}")]
    Store(String),

    #[error("invalid key length: expected 8 bytes, got {len}")]
    InvalidKey { len: usize },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a decode error for the record stored under `match_id`
    pub fn decode(match_id: i64, reason: impl Into<String>) -> Self {
        Self::Decode {
            match_id,
            reason: reason.into(),
        }
    }

    /// Check if this is a not found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::MatchNotFound(_))
    }

    /// Get HTTP status code for the service boundary
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::MatchNotFound(_) => 404,
            Self::Decode { .. }
            | Self::Store(_)
            | Self::InvalidKey { .. }
            | Self::Configuration(_) => 500,
        }
    }

    /// Get the machine-readable error code
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MatchNotFound(_) => "NoSuchMatch",
            Self::Decode { .. } => "CorruptRecord",
            Self::Store(_) => "StoreError",
            Self::InvalidKey { .. } => "InvalidKey",
            Self::Configuration(_) => "ConfigurationError",
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Configuration(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        assert!(Error::MatchNotFound(7).is_not_found());
        assert!(!Error::store("disk gone").is_not_found());
        assert!(!Error::decode(7, "truncated").is_not_found());
    }

    #[test]
    fn test_error_http_status() {
        assert_eq!(Error::MatchNotFound(1).http_status_code(), 404);
        assert_eq!(Error::decode(1, "bad wire type").http_status_code(), 500);
        assert_eq!(Error::store("io").http_status_code(), 500);
        assert_eq!(Error::InvalidKey { len: 3 }.http_status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::MatchNotFound(42).to_string(), "match not found: 42");
        assert_eq!(
            Error::InvalidKey { len: 9 }.to_string(),
            "invalid key length: expected 8 bytes, got 9"
        );
        assert_eq!(Error::decode(3, "eof").error_code(), "CorruptRecord");
    }
}
