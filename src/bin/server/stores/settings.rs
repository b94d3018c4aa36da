use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const ADMIN_EMAIL: &str = "admin_email";
pub const ADMIN_PASSWORD: &str = "admin_password";

/// Key-value store for admin settings with upsert-by-key semantics.
///
/// Seeded with a default recipient address so contact notifications have
/// somewhere to go before anyone touches the settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SettingsStore {
    entries: HashMap<String, String>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(ADMIN_EMAIL.to_owned(), "admin@example.com".to_owned());
        Self { entries }
    }
}

impl SettingsStore {
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    pub fn upsert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}
