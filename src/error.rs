//! Error types for the HNSW index

use thiserror::Error;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, HnswError>;

/// Error types that can occur while building or querying an index
#[derive(Error, Debug)]
pub enum HnswError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Index is empty: insert at least one vector before searching")]
    EmptyIndex,

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid vector: {reason}")]
    InvalidVector { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index lock poisoned")]
    LockPoisoned,
}
