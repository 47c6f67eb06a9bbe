//! Error types for solver configuration and I/O.

use thiserror::Error;

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any stage is dispatched. The per-cell kernels
/// themselves never fail.
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A buffer or mask does not match the lattice it is used with.
    #[error("Dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration or snapshot file.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
