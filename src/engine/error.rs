//! Engine error types

use crate::store::StoreError;
use thiserror::Error;

/// Errors the analytics engines can return
#[derive(Error, Debug)]
pub enum EngineError {
    /// Input failed validation (malformed or out of range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store failure, propagated unchanged
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
