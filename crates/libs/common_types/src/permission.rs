use serde::{Deserialize, Serialize};
use std::fmt;

/// A device capability the pipeline needs before it may touch the
/// corresponding OS service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Camera,
    PreciseLocation,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::PreciseLocation => write!(f, "precise location"),
        }
    }
}

/// Outcome of a permission check or request.
///
/// `Denied` can be recovered by asking again; `Blocked` can only be lifted
/// by the user in the OS settings, so the app never re-requests it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Blocked,
    Unavailable,
}

impl PermissionStatus {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Resolved statuses for every capability the capture flow depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSnapshot {
    pub camera: PermissionStatus,
    pub location: PermissionStatus,
}

impl PermissionSnapshot {
    #[must_use]
    pub fn all_granted(&self) -> bool {
        self.camera.is_granted() && self.location.is_granted()
    }
}
