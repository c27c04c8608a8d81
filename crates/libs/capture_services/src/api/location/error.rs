use crate::devices::positioning::PositionError;
use thiserror::Error;

/// Location resolution failures. All of them leave the last-known sample
/// in place and are recoverable through `retry`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location request timed out")]
    Timeout,

    #[error("location services are disabled")]
    ServiceDisabled,

    #[error("location permission was revoked")]
    PermissionRevoked,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("only stale fixes available ({age_ms} ms old)")]
    StaleFix { age_ms: i64 },

    /// A newer retry finished first; this outcome must be discarded.
    #[error("superseded by a newer location request")]
    Superseded,
}

impl From<PositionError> for LocationError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::Timeout => Self::Timeout,
            PositionError::ServiceDisabled => Self::ServiceDisabled,
            PositionError::PermissionRevoked => Self::PermissionRevoked,
            PositionError::Unavailable(message) => Self::Unavailable(message),
        }
    }
}
