//! Error types for document splitting.

use thiserror::Error;

/// Result type alias using SplitError.
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors that can occur while configuring a splitter or splitting documents.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Input is not a list of documents.
    #[error("Invalid input type: {message}")]
    InvalidInputType { message: String },

    /// Document content is absent.
    #[error("Document {id} has no content; only text documents can be split")]
    MissingContent { id: String },

    /// Document content is the empty string.
    #[error("Document {id} has empty content")]
    EmptyContent { id: String },

    /// Unit kind is not implemented, or function mode has no function.
    #[error("Unsupported split unit: {unit}")]
    UnsupportedSplitUnit { unit: String },

    /// Numeric configuration does not describe a valid windowing.
    #[error("Invalid split configuration: {message}")]
    InvalidSplitConfiguration { message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SplitError {
    /// Create an invalid input type error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInputType {
            message: message.into(),
        }
    }

    /// Create a missing content error.
    pub fn missing_content(id: impl Into<String>) -> Self {
        Self::MissingContent { id: id.into() }
    }

    /// Create an empty content error.
    pub fn empty_content(id: impl Into<String>) -> Self {
        Self::EmptyContent { id: id.into() }
    }

    /// Create an unsupported split unit error.
    pub fn unsupported_unit(unit: impl Into<String>) -> Self {
        Self::UnsupportedSplitUnit { unit: unit.into() }
    }

    /// Create an invalid split configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidSplitConfiguration {
            message: message.into(),
        }
    }

    /// Whether `run` skips the offending document instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyContent { .. })
    }

    /// Get the stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInputType { .. } => "INVALID_INPUT_TYPE",
            Self::MissingContent { .. } => "MISSING_CONTENT",
            Self::EmptyContent { .. } => "EMPTY_CONTENT",
            Self::UnsupportedSplitUnit { .. } => "UNSUPPORTED_SPLIT_UNIT",
            Self::InvalidSplitConfiguration { .. } => "INVALID_SPLIT_CONFIGURATION",
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitError::missing_content("doc-42");
        assert!(err.to_string().contains("doc-42"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SplitError::unsupported_unit("token").error_code(),
            "UNSUPPORTED_SPLIT_UNIT"
        );
        assert_eq!(
            SplitError::invalid_config("overlap").error_code(),
            "INVALID_SPLIT_CONFIGURATION"
        );
    }

    #[test]
    fn test_only_empty_content_is_recoverable() {
        assert!(SplitError::empty_content("a").is_recoverable());
        assert!(!SplitError::missing_content("a").is_recoverable());
        assert!(!SplitError::invalid_input("x").is_recoverable());
    }
}
