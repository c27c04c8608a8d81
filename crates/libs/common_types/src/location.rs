use serde::{Deserialize, Serialize};

/// Map anchor consumers fall back to before any fix has been resolved.
pub const FALLBACK_MAP_CENTER: (f64, f64) = (37.78825, -122.4324);

/// A single resolved position fix.
///
/// Produced exactly once per successful location resolution and immutable
/// afterwards; the resolving flow owns it until the upload consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// Epoch milliseconds at the moment the fix was taken.
    pub timestamp: i64,
}

impl LocationSample {
    /// Age of this fix relative to `now_ms`, in milliseconds.
    #[must_use]
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.timestamp
    }
}
