use serde::{Deserialize, Serialize};

/// Process-wide upload threshold read per system-info request.
///
/// Clients whose declared level is at or below this value are advised to
/// start uploading log files. Read-only from the ingestion core's side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigEntry {
    pub level: i32,
}

impl Default for ConfigEntry {
    fn default() -> Self {
        ConfigEntry { level: 0 }
    }
}

impl ConfigEntry {
    /// Whether a client reporting `client_level` should upload its logs.
    pub fn should_upload(&self, client_level: i32) -> bool {
        client_level <= self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let entry = ConfigEntry { level: 5 };
        assert!(entry.should_upload(3));
        assert!(entry.should_upload(5));
        assert!(!entry.should_upload(6));
    }
}
