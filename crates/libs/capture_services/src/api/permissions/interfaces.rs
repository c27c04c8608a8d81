use crate::devices::permissions::PermissionRationale;
use common_types::Capability;

/// User-facing explanation shown with the OS request for a capability.
#[must_use]
pub fn rationale_for(capability: Capability) -> PermissionRationale {
    match capability {
        Capability::Camera => PermissionRationale {
            title: "Camera Permission".into(),
            message: "Camera access is required to take pictures.".into(),
        },
        Capability::PreciseLocation => PermissionRationale {
            title: "Location Permission".into(),
            message: "Location access is required to tag photos with where they were taken."
                .into(),
        },
    }
}
