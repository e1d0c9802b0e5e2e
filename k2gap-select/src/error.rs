//! Error type for region-table loading and selection.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`DataLoad`](SelectionError::DataLoad) | the region table is missing, unreadable or malformed |
//! | [`InvalidInput`](SelectionError::InvalidInput) | star columns disagree in length |
//! | [`Io`](SelectionError::Io) | reading a caller-supplied file fails |
//!
//! Unknown or out-of-range campaign numbers are not errors; they select
//! nothing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    /// Region table could not be loaded. No partial table is ever returned.
    #[error("Data load error ({source_name}): {message}")]
    DataLoad {
        source_name: String,
        message: String,
    },

    /// Caller-supplied input is inconsistent. Raised before any computation.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, SelectionError>`.
pub type SelectionResult<T> = Result<T, SelectionError>;

impl SelectionError {
    /// Creates a [`DataLoad`](Self::DataLoad) error.
    pub fn data_load(source_name: &str, message: impl Into<String>) -> Self {
        Self::DataLoad {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }

    /// Creates an [`InvalidInput`](Self::InvalidInput) error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
