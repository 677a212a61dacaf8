//! Error types for vizeval.

use thiserror::Error;

/// Result type for vizeval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vizeval operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A document or configuration payload failed to parse.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rule configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parse("unexpected token");
        assert_eq!(err.to_string(), "Parse error: unexpected token");

        let err = Error::config("unknown category");
        assert_eq!(err.to_string(), "Configuration error: unknown category");
    }
}
