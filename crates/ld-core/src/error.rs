//! Error types for LuckyDraw

use thiserror::Error;

/// Core error type
///
/// Draw-time rejections (blank names, empty pools, re-entrant draws) are not
/// errors; they surface as `false` / `None`. This type covers I/O and
/// configuration failures only.
#[derive(Error, Debug)]
pub enum LdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid award: {0}")]
    InvalidAward(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("A draw is in progress")]
    DrawInProgress,
}

/// Result type alias
pub type LdResult<T> = Result<T, LdError>;
