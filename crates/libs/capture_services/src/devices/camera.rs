use app_state::CameraSettings;
use async_trait::async_trait;
use common_types::{CameraFacing, CapturedAsset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Photo,
}

/// Options passed to the native capture flow.
#[derive(Debug, Clone)]
pub struct CameraRequest {
    pub media_type: MediaType,
    pub save_to_photos: bool,
    pub facing: CameraFacing,
}

impl CameraRequest {
    #[must_use]
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            media_type: MediaType::Photo,
            save_to_photos: settings.save_to_photos,
            facing: settings.facing,
        }
    }
}

/// What the native camera came back with.
///
/// Cancellation is a normal outcome, not an error.
#[derive(Debug, Clone)]
pub enum CameraOutcome {
    Captured(CapturedAsset),
    Cancelled,
    Failed { code: String, message: String },
}

/// Seam over the device camera.
#[async_trait]
pub trait Camera: Send + Sync {
    async fn launch(&self, request: &CameraRequest) -> CameraOutcome;
}
