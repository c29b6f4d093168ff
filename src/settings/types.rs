//! Type definitions for the webhook settings

use serde::Serialize;

/// Key under which the webhook URL is persisted
pub const WEBHOOK_URL_KEY: &str = "n8n-webhook-url";

/// Key under which the API key is persisted
pub const API_KEY_KEY: &str = "n8n-api-key";

/// Current webhook settings as seen by every view
///
/// `is_connected` is never persisted and always starts out `false`.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub webhook_url: String,
    pub api_key: String,
    pub is_connected: bool,
}

impl Settings {
    /// API key with everything but the last four characters hidden
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count == 0 {
            return String::new();
        }
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.api_key.chars().skip(count - 4).collect();
        format!("{}{}", "*".repeat(count - 4), tail)
    }
}

/// Which kind of network attempt is reporting reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptKind {
    Probe,
    Submission,
}
