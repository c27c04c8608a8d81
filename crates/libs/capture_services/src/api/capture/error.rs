use thiserror::Error;

/// Camera flow failures. User cancellation is not among them; it is a
/// normal capture outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("the camera is already open")]
    CameraOpen,

    #[error("a captured photo is pending retake or upload")]
    AssetPending,

    #[error("camera error {code}: {message}")]
    Camera { code: String, message: String },
}
