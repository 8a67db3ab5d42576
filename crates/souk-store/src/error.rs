//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document matched the given key.
    #[error("not found: {0}")]
    NotFound(String),

    /// A unique field already holds the given value.
    #[error("duplicate key: {0}")]
    Duplicate(String),
}
