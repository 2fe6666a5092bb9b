use thiserror::Error;

/// sentiboard error types
#[derive(Error, Debug)]
pub enum SentiboardError {
    /// Caller passed a value outside a function's contract
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to parse a stored record
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for sentiboard
pub type Result<T> = std::result::Result<T, SentiboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SentiboardError::InvalidArgument("top_k must be positive".into());
        assert_eq!(err.to_string(), "invalid argument: top_k must be positive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SentiboardError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
