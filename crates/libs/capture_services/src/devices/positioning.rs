use app_state::LocationSettings;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Options for a single position resolution.
#[derive(Debug, Clone)]
pub struct PositionRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix no older than this is acceptable.
    pub maximum_age: Duration,
    /// Demand a fix fresher than any provider-level cache.
    pub force_fresh: bool,
}

impl PositionRequest {
    #[must_use]
    pub fn from_settings(settings: &LocationSettings) -> Self {
        Self {
            high_accuracy: settings.high_accuracy,
            timeout: settings.timeout(),
            maximum_age: settings.maximum_age(),
            force_fresh: settings.force_fresh,
        }
    }
}

/// A raw fix as delivered by the device location service.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// Epoch milliseconds at which the fix was taken; may predate the
    /// request when the service answers from its cache.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Error)]
pub enum PositionError {
    #[error("position request timed out")]
    Timeout,
    #[error("location services are disabled")]
    ServiceDisabled,
    #[error("location permission was revoked")]
    PermissionRevoked,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Seam over the device location service.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, request: &PositionRequest)
    -> Result<PositionFix, PositionError>;
}
