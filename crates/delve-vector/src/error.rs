//! Error types for delve-vector.

use thiserror::Error;

/// Result type for delve-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in delve-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid store setup (zero dimension, zero top-k).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dimension mismatch between a vector and the store.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (contains NaN or Inf).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Persistence error (serialization, corrupt snapshot).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
