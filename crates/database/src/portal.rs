use crate::error::DbError;
use crate::store::LedgerStore;
use serde::{Deserialize, Serialize};

/// Settings that apply to the whole installation rather than one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSettings {
    /// The address clients are told to log in at.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl PortalSettings {
    /// Reads the settings under `key`, falling back to defaults when the value
    /// is missing or unreadable.
    pub fn load<S: LedgerStore>(store: &S, key: &str) -> Result<Self, DbError> {
        let Some(raw) = store.get(key)? else {
            return Ok(Self::default());
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Stored portal settings are corrupt, using defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn save<S: LedgerStore>(&self, store: &S, key: &str) -> Result<(), DbError> {
        store.put(key, &serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn settings_round_trip_under_their_own_key() {
        let store = MemoryStore::new();
        assert_eq!(PortalSettings::load(&store, "finance_pro_config").unwrap(), PortalSettings::default());

        let settings = PortalSettings {
            public_url: Some("https://finance.example.com".to_string()),
        };
        settings.save(&store, "finance_pro_config").unwrap();

        assert_eq!(PortalSettings::load(&store, "finance_pro_config").unwrap(), settings);
        assert!(store.get("finance_pro_config").unwrap().unwrap().contains("publicUrl"));
    }

    #[test]
    fn corrupt_settings_fall_back() {
        let store = MemoryStore::new();
        store.put("finance_pro_config", "not json").unwrap();
        assert_eq!(PortalSettings::load(&store, "finance_pro_config").unwrap(), PortalSettings::default());
    }
}
