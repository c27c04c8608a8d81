use serde::{Deserialize, Serialize};

/// One transfer progress snapshot, as surfaced to upload observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.bytes_transferred as f64 / self.total_bytes as f64) * 100.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.bytes_transferred >= self.total_bytes
    }
}
