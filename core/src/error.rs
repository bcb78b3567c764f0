//! Error types for `LinkML` operations

use thiserror::Error;

/// Main error type for `LinkML` operations
#[derive(Error, Debug)]
pub enum LinkMLError {
    /// Schema parsing errors
    #[error("Failed to parse schema: {message}")]
    ParseError {
        /// Error message
        message: String,
        /// Location in schema if available
        location: Option<String>,
    },

    /// Import resolution errors
    #[error("Failed to resolve import '{import}': {reason}")]
    ImportError {
        /// Import that failed
        import: String,
        /// Reason for failure
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Collaborator failures (HTTP fetch, workbook generation, export)
    #[error("Service error: {0}")]
    ServiceError(String),
}

/// Result type alias for `LinkML` operations
pub type Result<T> = std::result::Result<T, LinkMLError>;

impl LinkMLError {
    /// Create a new parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with location
    #[must_use]
    pub fn parse_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new import error
    #[must_use]
    pub fn import(import: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImportError {
            import: import.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a new service error
    #[must_use]
    pub fn service(message: impl Into<String>) -> Self {
        Self::ServiceError(message.into())
    }

    /// Create an IO error from a message
    #[must_use]
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::IoError(std::io::Error::other(message.into()))
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }
}

impl From<serde_json::Error> for LinkMLError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for LinkMLError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
