//! Webhook settings shared by the connection tester and the submitter
//!
//! The settings consist of the webhook URL, the API key and the
//! "connected" flag. URL and key are persisted to a [`KeyValueStore`] under
//! fixed keys when [`SharedSettings::save`] is called; the flag only lives in
//! memory and starts out `false` on every run.
//!
//! # Connection flag precedence
//!
//! Probes and submissions both report reachability. Each attempt takes a
//! ticket when it starts ([`SharedSettings::begin_attempt`]) and reports
//! through [`Attempt::settle`]:
//!
//! - an outcome older than the last applied one is dropped
//! - a probe outcome is dropped while a submission is in flight
//!
//! so a submission always wins over a concurrent probe.
//!
//! # Examples
//!
//! ```rust
//! use contract_desk::settings::{MemoryStore, SettingsStore, SharedSettings};
//!
//! let settings = SharedSettings::new(SettingsStore::new(MemoryStore::new()));
//! settings.set_webhook_url("https://n8n.example.com/webhook/contract-analysis");
//! settings.save();
//!
//! assert!(!settings.snapshot().is_connected);
//! ```

pub mod storage;
pub mod store;
pub mod types;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::SettingsStore;
pub use types::{AttemptKind, Settings, API_KEY_KEY, WEBHOOK_URL_KEY};

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

struct Inner {
    store: SettingsStore,
    next_ticket: u64,
    applied_ticket: u64,
    submissions_in_flight: usize,
}

/// Cloneable handle to the one settings store of the process
#[derive(Clone)]
pub struct SharedSettings {
    inner: Arc<Mutex<Inner>>,
}

impl SharedSettings {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                store,
                next_ticket: 0,
                applied_ticket: 0,
                submissions_in_flight: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> Settings {
        self.lock().store.get().clone()
    }

    pub fn webhook_url(&self) -> String {
        self.lock().store.get().webhook_url.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.lock().store.get().is_connected
    }

    pub fn set_webhook_url(&self, url: impl Into<String>) {
        self.lock().store.set_webhook_url(url);
    }

    pub fn set_api_key(&self, key: impl Into<String>) {
        self.lock().store.set_api_key(key);
    }

    pub fn save(&self) {
        self.lock().store.save();
    }

    /// Register the start of a network attempt
    pub fn begin_attempt(&self, kind: AttemptKind) -> Attempt {
        let mut inner = self.lock();
        inner.next_ticket += 1;
        if kind == AttemptKind::Submission {
            inner.submissions_in_flight += 1;
        }
        Attempt {
            settings: self.clone(),
            ticket: inner.next_ticket,
            kind,
            settled: false,
        }
    }
}

/// A network attempt in flight; reports its outcome to the connection flag
#[must_use = "an attempt should be settled with its outcome"]
pub struct Attempt {
    settings: SharedSettings,
    ticket: u64,
    kind: AttemptKind,
    settled: bool,
}

impl Attempt {
    pub fn kind(&self) -> AttemptKind {
        self.kind
    }

    /// Record the outcome; returns whether it was applied to the flag
    pub fn settle(mut self, connected: bool) -> bool {
        let mut inner = self.settings.lock();
        if self.kind == AttemptKind::Submission {
            inner.submissions_in_flight = inner.submissions_in_flight.saturating_sub(1);
        }
        self.settled = true;

        let stale = self.ticket < inner.applied_ticket;
        let outranked = self.kind == AttemptKind::Probe && inner.submissions_in_flight > 0;
        if stale || outranked {
            debug!(
                "Dropping {:?} outcome (ticket {}, stale: {}, submission in flight: {})",
                self.kind, self.ticket, stale, outranked
            );
            return false;
        }

        inner.applied_ticket = self.ticket;
        inner.store.set_connected(connected);
        true
    }
}

impl Drop for Attempt {
    fn drop(&mut self) {
        if !self.settled && self.kind == AttemptKind::Submission {
            let mut inner = self.settings.lock();
            inner.submissions_in_flight = inner.submissions_in_flight.saturating_sub(1);
        }
    }
}
