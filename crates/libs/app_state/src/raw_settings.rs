use common_types::CameraFacing;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub location: LocationSettings,
    pub camera: CameraSettings,
    pub storage: StorageSettings,
    pub sync: SyncSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

/// Single-shot position resolution parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct LocationSettings {
    /// Ask the OS for a high-accuracy (GPS) fix.
    pub high_accuracy: bool,
    /// A resolution slower than this fails with a timeout.
    pub timeout_ms: u64,
    /// A cached OS fix no older than this may stand in for a fresh one.
    pub maximum_age_ms: u64,
    /// Bypass provider-level caching beyond `maximum_age_ms`.
    pub force_fresh: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraSettings {
    /// Keep a copy of the capture in the device photo library.
    pub save_to_photos: bool,
    pub facing: CameraFacing,
}

/// Where photo blobs are written and resolved from.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub base_url: String,
    /// Key prefix for photo objects (e.g. "images").
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncSettings {
    /// Document collection holding the photo records.
    pub collection: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
}
