use common_types::Capability;
use thiserror::Error;

/// Degraded permission states, surfaced instead of silently idling the
/// dependent flow. User-actionable, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionsError {
    #[error("{0} permission denied")]
    Denied(Capability),

    #[error("{0} permission blocked; it can only be enabled in the system settings")]
    Blocked(Capability),

    #[error("{0} is not available on this device")]
    Unavailable(Capability),
}
