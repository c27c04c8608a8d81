use crate::api::photos::error::PhotosError;
use crate::storage::PhotoStore;
use common_types::PhotoRecord;
use std::sync::Arc;
use tracing::debug;

/// Documents written before `file_name` existed get this placeholder.
const UNKNOWN_FILE_NAME: &str = "Unknown";

/// Read projection of the photo collection for the map and gallery views.
pub struct PhotoRepository {
    photos: Arc<dyn PhotoStore>,
}

impl PhotoRepository {
    #[must_use]
    pub fn new(photos: Arc<dyn PhotoStore>) -> Self {
        Self { photos }
    }

    /// All published photos, newest first.
    ///
    /// Documents missing `image_url` or `location` (partially written or
    /// legacy) are dropped rather than surfaced. One fetch per call, no
    /// caching, no internal retry.
    pub async fn list_photos(&self) -> Result<Vec<PhotoRecord>, PhotosError> {
        let rows = self.photos.list_by_uploaded_desc().await?;
        let total = rows.len();

        let records: Vec<PhotoRecord> = rows
            .into_iter()
            .filter_map(|row| {
                let (Some(image_url), Some(location)) = (row.image_url, row.location) else {
                    debug!("Skipping incomplete photo document {}", row.id);
                    return None;
                };
                Some(PhotoRecord {
                    id: row.id,
                    image_url,
                    location,
                    uploaded_at: row.uploaded_at,
                    file_name: row.file_name.unwrap_or_else(|| UNKNOWN_FILE_NAME.to_owned()),
                })
            })
            .collect();

        debug!("Listed {} of {} photo documents", records.len(), total);
        Ok(records)
    }
}
