//! Error types for background transparency operations

use std::fmt::Display;
use thiserror::Error;

/// Result type alias for background transparency operations
pub type Result<T> = std::result::Result<T, TransparencyError>;

/// Error types for every stage of the transparency pipeline
#[derive(Error, Debug)]
pub enum TransparencyError {
    /// File system errors (file not found, permission denied, path errors)
    ///
    /// The I/O error is rendered in the message and not exposed as a
    /// source, so error chains print the cause once.
    #[error("File system error: {0}")]
    FileSystem(std::io::Error),

    /// Format tag not recognized or not handled at a decode/encode boundary
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Format has no encoder in the data URI path
    #[error("Unsupported data URI encode format: {0}")]
    UnsupportedEncodeFormat(String),

    /// The codec rejected the byte stream
    #[error("Decode error: {0}")]
    Decode(String),

    /// The codec failed to produce a byte stream
    #[error("Encode error: {0}")]
    Encode(String),

    /// Malformed base64 payload in a data URI
    #[error("Base64 decode error: {0}")]
    Base64Decode(String),

    /// The image already contains non-opaque pixels
    #[error("image not converted - it was probably already transparent")]
    AlreadyTransparent,

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Degenerate input that the pipeline cannot process
    #[error("Processing error: {0}")]
    Processing(String),
}

impl From<std::io::Error> for TransparencyError {
    fn from(error: std::io::Error) -> Self {
        Self::FileSystem(error)
    }
}

impl TransparencyError {
    /// Create a new unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create a decode error naming the codec that failed
    pub fn decode_error(format: impl Display, error: impl Display) -> Self {
        Self::Decode(format!("failed to decode {} image: {}", format, error))
    }

    /// Create an encode error naming the codec that failed
    pub fn encode_error(format: impl Display, error: impl Display) -> Self {
        Self::Encode(format!("failed to encode {} image: {}", format, error))
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::FileSystem(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: Display>(parameter: &str, value: T, valid_range: &str) -> Self {
        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {})",
            parameter, value, valid_range
        ))
    }
}
