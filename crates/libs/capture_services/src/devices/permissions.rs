use async_trait::async_trait;
use common_types::{Capability, PermissionStatus};

/// Why the app is asking, shown to the user before or while the OS prompt
/// is up.
#[derive(Debug, Clone)]
pub struct PermissionRationale {
    pub title: String,
    pub message: String,
}

/// Seam over the platform permission subsystem.
///
/// Capability identifiers map to platform-specific names behind this trait;
/// the services only speak [`Capability`].
#[async_trait]
pub trait PermissionGateway: Send + Sync {
    /// Current status without prompting. `None` means the capability has
    /// never been requested (undetermined).
    async fn check(&self, capability: Capability) -> Option<PermissionStatus>;

    /// Surface the rationale and request the capability from the OS.
    async fn request(
        &self,
        capability: Capability,
        rationale: &PermissionRationale,
    ) -> PermissionStatus;

    /// Deep-link into the OS settings page for this app. The only way out
    /// of [`PermissionStatus::Blocked`].
    async fn open_settings(&self);
}
