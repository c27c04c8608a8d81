use crate::storage::StoreError;
use thiserror::Error;

/// Read-projection failures. Non-fatal: consumers render an empty or error
/// state and may re-query on their own lifecycle.
#[derive(Debug, Error)]
pub enum PhotosError {
    #[error("photo store error: {0}")]
    Store(#[from] StoreError),
}
