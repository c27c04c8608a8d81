use crate::api::upload::error::UploadError;
use crate::api::upload::interfaces::UploadOutcome;
use crate::storage::{ObjectStore, PhotoStore, ProgressObserver, StoreError};
use crate::utils::Clock;
use common_types::{CapturedAsset, LocationSample, NewPhotoRecord, derive_file_name};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Publishes one capture: blob to object storage first, then the metadata
/// record. The blob write strictly precedes the metadata write, so a record
/// is never visible without its blob; the inverse (an orphaned blob after a
/// failed metadata write) is tolerated and only logged.
pub struct UploadPipeline {
    objects: Arc<dyn ObjectStore>,
    photos: Arc<dyn PhotoStore>,
    /// Key prefix for photo blobs, e.g. "images".
    prefix: String,
    in_flight: AtomicBool,
    clock: Clock,
}

impl UploadPipeline {
    #[must_use]
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        photos: Arc<dyn PhotoStore>,
        prefix: impl Into<String>,
        clock: Clock,
    ) -> Self {
        Self {
            objects,
            photos,
            prefix: prefix.into(),
            in_flight: AtomicBool::new(false),
            clock,
        }
    }

    /// Upload `asset` tagged with `location`.
    ///
    /// Both inputs are required; absence of either fails fast before any
    /// network I/O. At most one upload may be in flight per pipeline; a
    /// concurrent second call is rejected.
    pub async fn upload(
        &self,
        asset: Option<&CapturedAsset>,
        location: Option<&LocationSample>,
        observer: Option<ProgressObserver>,
    ) -> Result<UploadOutcome, UploadError> {
        let asset = asset.ok_or(UploadError::MissingAsset)?;
        let location = location.ok_or(UploadError::MissingLocation)?;

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(UploadError::AlreadyInFlight);
        }
        let result = self.run(asset, location, observer).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run(
        &self,
        asset: &CapturedAsset,
        location: &LocationSample,
        observer: Option<ProgressObserver>,
    ) -> Result<UploadOutcome, UploadError> {
        let capture_epoch_ms = (self.clock)();
        let file_name = derive_file_name(capture_epoch_ms, asset);
        let key = format!("{}/{}", self.prefix, file_name);

        info!("Starting upload of {} as {}", asset.local_uri, key);
        self.objects
            .put(&key, Path::new(asset.local_path()), observer)
            .await
            .map_err(UploadError::Transfer)?;

        let image_url = self
            .objects
            .download_url(&key)
            .await
            .map_err(UploadError::Transfer)?;

        let record = NewPhotoRecord {
            image_url: image_url.to_string(),
            location: location.clone(),
            file_name: file_name.clone(),
        };
        let record_id = self.photos.append(record).await.map_err(|err| {
            orphaned_blob_warning(&key, &err);
            UploadError::Metadata(err)
        })?;

        info!("Upload complete: record {record_id} for {file_name}");
        Ok(UploadOutcome {
            record_id,
            image_url,
            file_name,
        })
    }
}

/// The blob made it, the record did not. Nothing reconciles this later;
/// the key is logged so operators can find the orphan.
fn orphaned_blob_warning(key: &str, err: &StoreError) {
    warn!("Metadata write failed after blob {key} was stored; blob is orphaned: {err}");
}
