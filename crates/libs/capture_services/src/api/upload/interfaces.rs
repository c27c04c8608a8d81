use serde::Serialize;
use url::Url;

/// What a completed upload produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    /// Id the photo store assigned to the new record.
    pub record_id: String,
    pub image_url: Url,
    /// Derived storage key, `photo_<epochMs>_<basename>`.
    pub file_name: String,
}
