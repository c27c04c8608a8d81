use crate::storage::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common_types::{LocationSample, NewPhotoRecord};

/// A raw document as it lives in the photo collection.
///
/// Fields other than `id` and `uploaded_at` are optional so that partially
/// written or legacy documents can be represented (and filtered out by the
/// read side).
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPhoto {
    pub id: String,
    pub image_url: Option<String>,
    pub location: Option<LocationSample>,
    pub uploaded_at: DateTime<Utc>,
    pub file_name: Option<String>,
}

/// Append-only document store for photo records.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Append a document; the store assigns `id` and the server timestamp.
    /// Returns the assigned id.
    async fn append(&self, record: NewPhotoRecord) -> Result<String, StoreError>;

    /// Full collection ordered by `uploaded_at` descending (newest first).
    async fn list_by_uploaded_desc(&self) -> Result<Vec<StoredPhoto>, StoreError>;
}
