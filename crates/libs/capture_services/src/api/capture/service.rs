use crate::api::capture::error::CaptureError;
use crate::devices::camera::{Camera, CameraOutcome, CameraRequest};
use common_types::CapturedAsset;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Where the capture session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
    Captured(CapturedAsset),
}

/// Drives the native camera flow and holds the captured asset until the
/// user decides between retake and upload.
pub struct CaptureController {
    camera: Arc<dyn Camera>,
    request: CameraRequest,
    state: Mutex<CaptureState>,
}

impl CaptureController {
    #[must_use]
    pub fn new(camera: Arc<dyn Camera>, request: CameraRequest) -> Self {
        Self {
            camera,
            request,
            state: Mutex::new(CaptureState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> CaptureState {
        self.state.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn current_asset(&self) -> Option<CapturedAsset> {
        match self.state() {
            CaptureState::Captured(asset) => Some(asset),
            _ => None,
        }
    }

    /// Launch the camera. `Ok(None)` means the user cancelled; no error is
    /// reported for that and the controller is idle again.
    pub async fn capture(&self) -> Result<Option<CapturedAsset>, CaptureError> {
        {
            let mut state = self.state.lock().expect("lock poisoned");
            match &*state {
                CaptureState::Idle => *state = CaptureState::Capturing,
                CaptureState::Capturing => return Err(CaptureError::CameraOpen),
                CaptureState::Captured(_) => return Err(CaptureError::AssetPending),
            }
        }

        let outcome = self.camera.launch(&self.request).await;
        let mut state = self.state.lock().expect("lock poisoned");
        match outcome {
            CameraOutcome::Captured(asset) => {
                info!("Image captured: {}", asset.local_uri);
                *state = CaptureState::Captured(asset.clone());
                Ok(Some(asset))
            }
            CameraOutcome::Cancelled => {
                info!("User cancelled camera");
                *state = CaptureState::Idle;
                Ok(None)
            }
            CameraOutcome::Failed { code, message } => {
                warn!("Camera error {code}: {message}");
                *state = CaptureState::Idle;
                Err(CaptureError::Camera { code, message })
            }
        }
    }

    /// Discard the pending asset and return to idle. Returns what was
    /// discarded, if anything.
    pub fn retake(&self) -> Option<CapturedAsset> {
        self.take_asset()
    }

    /// Consume the pending asset (upload completion or retake); the
    /// controller is idle afterwards.
    pub fn take_asset(&self) -> Option<CapturedAsset> {
        let mut state = self.state.lock().expect("lock poisoned");
        if let CaptureState::Captured(asset) = &*state {
            let asset = asset.clone();
            *state = CaptureState::Idle;
            return Some(asset);
        }
        None
    }
}
