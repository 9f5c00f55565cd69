//! Error types for tilegan
//!
//! Every error is fatal: the trainer performs no retries and no partial
//! recovery, so each variant propagates to the caller unchanged.

use std::path::PathBuf;

/// Result type alias for tilegan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed level file
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// Fewer examples than a single batch
    #[error("Insufficient data: {examples} examples cannot fill a batch of {batch_size}")]
    InsufficientData {
        /// Number of examples available
        examples: usize,
        /// Configured batch size
        batch_size: usize,
    },

    /// Failure persisting a model snapshot or sample image
    #[error("Checkpoint write error at {}: {message}", path.display())]
    CheckpointWrite {
        /// Target path of the failed write
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Weights that cannot be read or do not match the model
    #[error("State dict error: {0}")]
    StateDict(String),

    /// Backward pass requested on a forward pass recorded without gradient
    #[error("Gradient error: {0}")]
    Gradient(String),
}

impl Error {
    pub(crate) fn checkpoint_write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Error::CheckpointWrite {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<crate::config::ValidationError> for Error {
    fn from(err: crate::config::ValidationError) -> Self {
        match err {
            crate::config::ValidationError::DataPathNotFound(_) => Error::DataLoad(err.to_string()),
            _ => Error::Configuration(format!("Invalid config: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = Error::InsufficientData {
            examples: 3,
            batch_size: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: 3 examples cannot fill a batch of 4"
        );
    }

    #[test]
    fn test_missing_level_file_is_data_load() {
        let err: Error =
            crate::config::ValidationError::DataPathNotFound("levels.json".to_string()).into();
        assert!(matches!(err, Error::DataLoad(ref m) if m.contains("levels.json")));

        let err: Error = crate::config::ValidationError::InvalidBatchSize(0).into();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_checkpoint_write_includes_path() {
        let err = Error::checkpoint_write("out/fakes50.png", "disk full");
        let msg = err.to_string();
        assert!(msg.contains("out/fakes50.png"));
        assert!(msg.contains("disk full"));
    }
}
