use crate::api::permissions::error::PermissionsError;
use crate::api::permissions::interfaces::rationale_for;
use crate::devices::permissions::PermissionGateway;
use common_types::{Capability, PermissionSnapshot, PermissionStatus};
use std::sync::Arc;
use tracing::{info, warn};

/// Resolves capability authorization ahead of the flows that need it.
///
/// `Blocked` is terminal inside the app: the coordinator never re-requests
/// it, the only action left is the settings deep-link exposed by
/// [`PermissionCoordinator::open_settings`].
pub struct PermissionCoordinator {
    gateway: Arc<dyn PermissionGateway>,
}

impl PermissionCoordinator {
    #[must_use]
    pub fn new(gateway: Arc<dyn PermissionGateway>) -> Self {
        Self { gateway }
    }

    /// Query the current status of one capability and request it from the
    /// OS when it is undetermined or merely denied.
    pub async fn resolve(&self, capability: Capability) -> PermissionStatus {
        let checked = self.gateway.check(capability).await;
        match checked {
            Some(PermissionStatus::Granted) => PermissionStatus::Granted,
            Some(PermissionStatus::Blocked) => {
                warn!(
                    "{capability} permission is blocked; not re-requesting, settings deep-link only"
                );
                PermissionStatus::Blocked
            }
            Some(PermissionStatus::Unavailable) => {
                warn!("{capability} is unavailable on this device");
                PermissionStatus::Unavailable
            }
            // Undetermined, or denied but still requestable.
            None | Some(PermissionStatus::Denied) => {
                let status = self
                    .gateway
                    .request(capability, &rationale_for(capability))
                    .await;
                info!("{capability} permission request answered: {status:?}");
                status
            }
        }
    }

    /// Resolve every capability the capture flow depends on, the way the
    /// capture screen asks for them as a pair on mount.
    pub async fn resolve_all(&self) -> PermissionSnapshot {
        PermissionSnapshot {
            camera: self.resolve(Capability::Camera).await,
            location: self.resolve(Capability::PreciseLocation).await,
        }
    }

    /// Gate for downstream components: maps a non-granted status to the
    /// matching degraded-state error.
    pub fn require_granted(
        status: PermissionStatus,
        capability: Capability,
    ) -> Result<(), PermissionsError> {
        match status {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied => Err(PermissionsError::Denied(capability)),
            PermissionStatus::Blocked => Err(PermissionsError::Blocked(capability)),
            PermissionStatus::Unavailable => Err(PermissionsError::Unavailable(capability)),
        }
    }

    /// Deep-link to the OS settings page; the recovery path for `Blocked`.
    pub async fn open_settings(&self) {
        self.gateway.open_settings().await;
    }
}
