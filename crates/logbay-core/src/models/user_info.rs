use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Platform;

/// Device/system snapshot reported by a client alongside its identity.
///
/// Keyed by (platform, uid, app_id). The upsert rule compares attributes
/// only: an identical repeat is a no-op, a changed snapshot overwrites the
/// stored record while keeping its identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Store-assigned identity; `None` until first saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub platform: Platform,
    pub uid: String,
    #[serde(rename = "appId")]
    pub app_id: String,
    /// Severity threshold the client currently uploads at.
    pub level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "systemVersion", skip_serializing_if = "Option::is_none")]
    pub system_version: Option<String>,
    #[serde(rename = "sdkVersion", skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
}

impl UserInfo {
    /// Attribute-wise equality, ignoring store identity. Two snapshots that
    /// compare equal here must not produce a second write.
    pub fn same_attributes(&self, other: &UserInfo) -> bool {
        self.platform == other.platform
            && self.uid == other.uid
            && self.app_id == other.app_id
            && self.level == other.level
            && self.alias == other.alias
            && self.model == other.model
            && self.brand == other.brand
            && self.system_version == other.system_version
            && self.sdk_version == other.sdk_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserInfo {
        UserInfo {
            id: None,
            platform: Platform::Ios,
            uid: "uid-9".to_string(),
            app_id: "app-9".to_string(),
            level: 2,
            alias: Some("tester".to_string()),
            model: Some("iPhone12,3".to_string()),
            brand: Some("Apple".to_string()),
            system_version: Some("17.2".to_string()),
            sdk_version: Some("1.1.0".to_string()),
        }
    }

    #[test]
    fn identity_does_not_affect_attribute_equality() {
        let a = snapshot();
        let mut b = snapshot();
        b.id = Some(Uuid::new_v4());
        assert!(a.same_attributes(&b));
    }

    #[test]
    fn changed_attribute_breaks_equality() {
        let a = snapshot();
        let mut b = snapshot();
        b.system_version = Some("17.3".to_string());
        assert!(!a.same_attributes(&b));
    }
}
