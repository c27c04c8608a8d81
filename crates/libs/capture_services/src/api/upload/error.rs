use crate::storage::StoreError;
use thiserror::Error;

/// Terminal upload failures. An upload is never resumable; the caller
/// re-invokes it from scratch with the same asset and sample.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Precondition: checked before any network I/O.
    #[error("no captured photo to upload")]
    MissingAsset,

    /// Precondition: checked before any network I/O.
    #[error("location not available; ensure location services are enabled")]
    MissingLocation,

    /// A second upload was attempted while one is pending; it is rejected,
    /// not queued.
    #[error("an upload is already in progress")]
    AlreadyInFlight,

    /// Blob transfer failed; no metadata was written.
    #[error("transfer failed: {0}")]
    Transfer(#[source] StoreError),

    /// Metadata write failed after the blob was stored; the blob is now
    /// orphaned and stays that way.
    #[error("metadata write failed: {0}")]
    Metadata(#[source] StoreError),
}
