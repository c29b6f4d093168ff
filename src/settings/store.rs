//! Settings store backed by a key-value medium

use tracing::{debug, error, warn};

use super::storage::KeyValueStore;
use super::types::{Settings, API_KEY_KEY, WEBHOOK_URL_KEY};

/// Owns the in-memory settings and the medium they are saved to
///
/// Setters only touch memory; nothing reaches the medium until [`save`]
/// is called, so the in-memory values may run ahead of the persisted ones.
///
/// [`save`]: SettingsStore::save
pub struct SettingsStore {
    storage: Box<dyn KeyValueStore>,
    settings: Settings,
    loaded: bool,
}

impl SettingsStore {
    /// Create a store and load any previously saved values
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        let mut store = Self {
            storage: Box::new(storage),
            settings: Settings::default(),
            loaded: false,
        };
        store.load();
        store
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn set_webhook_url(&mut self, url: impl Into<String>) {
        self.settings.webhook_url = url.into();
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.settings.api_key = key.into();
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.settings.is_connected = connected;
    }

    /// Write the webhook URL and API key to the medium
    ///
    /// Both values are written in one step. A failing medium is logged and
    /// otherwise ignored.
    pub fn save(&self) {
        let entries = [
            (WEBHOOK_URL_KEY, self.settings.webhook_url.as_str()),
            (API_KEY_KEY, self.settings.api_key.as_str()),
        ];
        match self.storage.set_many(&entries) {
            Ok(()) => debug!("Settings saved"),
            Err(e) => error!("Error saving settings: {e}"),
        }
    }

    /// Read saved values into memory; only the first call has any effect
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        match self.storage.get(WEBHOOK_URL_KEY) {
            Ok(Some(url)) if !url.is_empty() => self.settings.webhook_url = url,
            Ok(_) => {}
            Err(e) => warn!("Error loading settings ({WEBHOOK_URL_KEY}): {e}"),
        }
        match self.storage.get(API_KEY_KEY) {
            Ok(Some(key)) if !key.is_empty() => self.settings.api_key = key,
            Ok(_) => {}
            Err(e) => warn!("Error loading settings ({API_KEY_KEY}): {e}"),
        }
    }
}
