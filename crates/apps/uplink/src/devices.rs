//! Device adapters for a headless field uploader: the "camera" is a photo
//! already on disk, the position comes from the command line, and the
//! capabilities are provisioned on the device.

use async_trait::async_trait;
use capture_services::devices::camera::{Camera, CameraOutcome, CameraRequest};
use capture_services::devices::permissions::{PermissionGateway, PermissionRationale};
use capture_services::devices::positioning::{
    PositionError, PositionFix, PositionRequest, PositionSource,
};
use capture_services::utils::Clock;
use common_types::{Capability, CapturedAsset, PermissionStatus};
use std::path::PathBuf;
use tracing::info;

/// "Camera" that yields a photo file passed on the command line.
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn launch(&self, _request: &CameraRequest) -> CameraOutcome {
        if !self.path.is_file() {
            return CameraOutcome::Failed {
                code: "no_such_file".into(),
                message: format!("{} does not exist", self.path.display()),
            };
        }
        CameraOutcome::Captured(CapturedAsset::new(self.path.display().to_string()))
    }
}

/// Position source answering with fixed coordinates, stamped at call time.
pub struct StaticPositionSource {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub clock: Clock,
}

#[async_trait]
impl PositionSource for StaticPositionSource {
    async fn current_position(
        &self,
        _request: &PositionRequest,
    ) -> Result<PositionFix, PositionError> {
        Ok(PositionFix {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
            timestamp: (self.clock)(),
        })
    }
}

/// Pre-provisioned device: every capability is granted.
pub struct ProvisionedGateway;

#[async_trait]
impl PermissionGateway for ProvisionedGateway {
    async fn check(&self, _capability: Capability) -> Option<PermissionStatus> {
        Some(PermissionStatus::Granted)
    }

    async fn request(
        &self,
        capability: Capability,
        _rationale: &PermissionRationale,
    ) -> PermissionStatus {
        info!("{capability} requested on a provisioned device; granting");
        PermissionStatus::Granted
    }

    async fn open_settings(&self) {
        info!("No settings UI on a headless device; adjust provisioning instead");
    }
}
