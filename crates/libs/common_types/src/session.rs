use crate::{CapturedAsset, LocationSample, PermissionSnapshot, PermissionStatus};
use serde::{Deserialize, Serialize};

/// Terminal and in-flight states of the publish step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum UploadStatus {
    Idle,
    InFlight,
    Succeeded { record_id: String },
    Failed { message: String },
}

/// The whole capture session as one owned record.
///
/// Replaces the per-screen flags (location, captured asset, upload busy)
/// that could otherwise drift out of sync; every flow mutation goes through
/// a transition method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSession {
    pub permissions: PermissionSnapshot,
    pub location: Option<LocationSample>,
    pub asset: Option<CapturedAsset>,
    pub upload: UploadStatus,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            permissions: PermissionSnapshot {
                camera: PermissionStatus::Denied,
                location: PermissionStatus::Denied,
            },
            location: None,
            asset: None,
            upload: UploadStatus::Idle,
        }
    }

    pub fn permissions_resolved(&mut self, snapshot: PermissionSnapshot) {
        self.permissions = snapshot;
    }

    /// A newer fix always replaces the previous one.
    pub fn location_resolved(&mut self, sample: LocationSample) {
        self.location = Some(sample);
    }

    pub fn asset_captured(&mut self, asset: CapturedAsset) {
        self.asset = Some(asset);
    }

    /// User chose to retake; the pending asset is discarded.
    pub fn retake(&mut self) -> Option<CapturedAsset> {
        self.asset.take()
    }

    /// Both inputs the upload pipeline requires are present and no upload
    /// is currently running.
    #[must_use]
    pub fn can_upload(&self) -> bool {
        self.asset.is_some() && self.location.is_some() && self.upload != UploadStatus::InFlight
    }

    pub fn upload_started(&mut self) {
        self.upload = UploadStatus::InFlight;
    }

    /// The asset is consumed on success; a fresh capture is needed before
    /// the next publish.
    pub fn upload_succeeded(&mut self, record_id: impl Into<String>) {
        self.upload = UploadStatus::Succeeded {
            record_id: record_id.into(),
        };
        self.asset = None;
    }

    /// The asset survives a failure; the user retries the publish with the
    /// same in-memory asset, no re-capture needed.
    pub fn upload_failed(&mut self, message: impl Into<String>) {
        self.upload = UploadStatus::Failed {
            message: message.into(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocationSample {
        LocationSample {
            latitude: 37.78825,
            longitude: -122.4324,
            accuracy: Some(5.0),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn upload_needs_both_inputs() {
        let mut session = CaptureSession::new();
        assert!(!session.can_upload());

        session.location_resolved(sample());
        assert!(!session.can_upload());

        session.asset_captured(CapturedAsset::new("/tmp/a.jpg"));
        assert!(session.can_upload());

        session.upload_started();
        assert!(!session.can_upload());
    }

    #[test]
    fn successful_upload_consumes_asset() {
        let mut session = CaptureSession::new();
        session.location_resolved(sample());
        session.asset_captured(CapturedAsset::new("/tmp/a.jpg"));

        session.upload_started();
        session.upload_succeeded("abc123");
        assert!(session.asset.is_none());
        assert_eq!(
            session.upload,
            UploadStatus::Succeeded {
                record_id: "abc123".into()
            }
        );
    }

    #[test]
    fn failed_upload_keeps_asset_and_location_for_retry() {
        let mut session = CaptureSession::new();
        session.location_resolved(sample());
        session.asset_captured(CapturedAsset::new("/tmp/a.jpg"));

        session.upload_started();
        session.upload_failed("network down");
        // Both inputs survive the failure; the retry needs no re-capture.
        assert_eq!(session.asset, Some(CapturedAsset::new("/tmp/a.jpg")));
        assert!(session.location.is_some());
        assert!(session.can_upload());

        session.upload_started();
        session.upload_succeeded("abc123");
        assert!(session.asset.is_none());
    }

    #[test]
    fn retake_discards_pending_asset() {
        let mut session = CaptureSession::new();
        session.asset_captured(CapturedAsset::new("/tmp/a.jpg"));
        let discarded = session.retake();
        assert_eq!(discarded, Some(CapturedAsset::new("/tmp/a.jpg")));
        assert!(session.asset.is_none());
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = CaptureSession::new();
        session.location_resolved(sample());
        session.upload_started();

        let json = serde_json::to_string(&session).unwrap();
        let back: CaptureSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }
}
