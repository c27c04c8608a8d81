use crate::LocationSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Camera lens selection, also used in the capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    Back,
    Front,
}

/// A locally captured photo that has not been published yet.
///
/// At most one instance is alive per capture session; it is discarded on
/// retake and consumed when an upload succeeds. A failed upload keeps it
/// so the publish can be retried without re-capturing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedAsset {
    pub local_uri: String,
}

impl CapturedAsset {
    #[must_use]
    pub fn new(local_uri: impl Into<String>) -> Self {
        Self {
            local_uri: local_uri.into(),
        }
    }

    /// Final path segment of the local URI, used in the derived storage key.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.local_uri
            .rsplit_once('/')
            .map_or(self.local_uri.as_str(), |(_, name)| name)
    }

    /// Filesystem path of the asset, with any `file://` scheme stripped.
    #[must_use]
    pub fn local_path(&self) -> &str {
        self.local_uri
            .strip_prefix("file://")
            .unwrap_or(&self.local_uri)
    }
}

/// A published photo: blob URL plus the location it was taken at.
///
/// Immutable once written; never updated or deleted by this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Assigned by the photo store on append.
    pub id: String,
    pub image_url: String,
    pub location: LocationSample,
    /// Server-assigned timestamp; the global feed is ordered by it.
    pub uploaded_at: DateTime<Utc>,
    pub file_name: String,
}

/// A record as handed to the photo store; `id` and `uploaded_at` are
/// assigned by the store itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhotoRecord {
    pub image_url: String,
    pub location: LocationSample,
    pub file_name: String,
}

/// Derives the storage key for a capture: `photo_<epochMs>_<basename>`.
///
/// The capture instant makes the key practically unique even when two
/// captures share a source basename.
#[must_use]
pub fn derive_file_name(capture_epoch_ms: i64, asset: &CapturedAsset) -> String {
    format!("photo_{capture_epoch_ms}_{}", asset.basename())
}
