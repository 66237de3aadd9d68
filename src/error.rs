use std::fmt;

/// Result type for Ares operations
pub type Result<T> = std::result::Result<T, AresError>;

/// Main error type for the Ares library
#[derive(Debug, Clone)]
pub enum AresError {
    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// IO errors (file operations)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// Empty buffer or container
    EmptyBuffer(String),
}

impl fmt::Display for AresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AresError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            AresError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            AresError::IoError(msg) => write!(f, "IO error: {}", msg),
            AresError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AresError::EmptyBuffer(msg) => write!(f, "Empty buffer: {}", msg),
        }
    }
}

impl std::error::Error for AresError {}

// Conversion from std::io::Error
impl From<std::io::Error> for AresError {
    fn from(err: std::io::Error) -> Self {
        AresError::IoError(err.to_string())
    }
}

// Conversion from bincode::Error
impl From<bincode::Error> for AresError {
    fn from(err: bincode::Error) -> Self {
        AresError::SerializationError(err.to_string())
    }
}

// Helper functions for common error patterns
impl AresError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        AresError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        AresError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
