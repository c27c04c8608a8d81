use crate::storage::StoreError;
use async_trait::async_trait;
use common_types::UploadProgress;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Callback fed `(bytesTransferred, totalBytes)` snapshots during a
/// transfer.
pub type ProgressObserver = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Key-addressable binary store for the photo bytes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write the file at `source` under `key`, reporting progress to the
    /// observer as bytes move.
    async fn put(
        &self,
        key: &str,
        source: &Path,
        observer: Option<ProgressObserver>,
    ) -> Result<(), StoreError>;

    /// Publicly resolvable URL for the object stored under `key`.
    async fn download_url(&self, key: &str) -> Result<Url, StoreError>;
}
