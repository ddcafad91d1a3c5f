use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Platform;

/// Record of a parse-time decrypt failure.
///
/// Written to the decrypt-error sink by the parser; never reported back to
/// the uploading client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptError {
    pub platform: Platform,
    pub uid: String,
    #[serde(rename = "appId")]
    pub app_id: String,
    /// Opaque staged filename the failure occurred in.
    pub filename: String,
    pub reason: String,
    #[serde(rename = "occurredAt")]
    pub occurred_at: DateTime<Utc>,
}
