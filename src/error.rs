//! Error types for the prnn crate.
//!
//! A single error enum covers every fallible operation, derived with the
//! `thiserror` crate.

use thiserror::Error;

/// The main error type for prnn operations.
#[derive(Error, Debug)]
pub enum PrnnError {
    /// Configuration vector is malformed (wrong length, non-binary value,
    /// out-of-range code, or a matrix without its feedforward backbone)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Dynamics array does not have the expected shape
    #[error("Invalid dynamics shape: expected {expected}, got {actual}")]
    InvalidDynamicsShape {
        /// Expected shape or length
        expected: String,
        /// Actual shape or length received
        actual: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Index out of bounds
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds {
        /// The index that was accessed
        index: usize,
        /// The valid length
        length: usize,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for prnn operations.
pub type Result<T> = std::result::Result<T, PrnnError>;
