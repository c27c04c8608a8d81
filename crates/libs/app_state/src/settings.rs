use crate::{
    CameraSettings, LocationSettings, LoggingSettings, RawSettings, SecretSettings, StorageSettings,
    SyncSettings,
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub location: LocationSettings,
    pub camera: CameraSettings,
    pub storage: StorageSettings,
    pub sync: SyncSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        // URL joining later on relies on the base ending with a slash.
        let mut storage = raw.storage;
        if !storage.base_url.ends_with('/') {
            storage.base_url.push('/');
        }
        storage.prefix = storage.prefix.trim_matches('/').to_owned();

        Self {
            location: raw.location,
            camera: raw.camera,
            storage,
            sync: raw.sync,
            logging: raw.logging,
            secrets: raw.secrets,
        }
    }
}

impl LocationSettings {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn maximum_age(&self) -> Duration {
        Duration::from_millis(self.maximum_age_ms)
    }
}
