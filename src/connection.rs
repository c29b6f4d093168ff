//! Webhook reachability probe

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::abstractions::WebhookClient;
use crate::analysis::ConnectionProbe;
use crate::error::{Error, Result};
use crate::settings::{AttemptKind, SharedSettings};

/// Result of a probe that reached the network
#[derive(Debug)]
pub enum ConnectionOutcome {
    Connected { status: u16 },
    Disconnected(Error),
}

impl ConnectionOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionOutcome::Connected { .. })
    }

    pub fn message(&self) -> String {
        match self {
            ConnectionOutcome::Connected { status } => {
                format!("Connected to webhook (HTTP {status})")
            }
            ConnectionOutcome::Disconnected(e) => e.user_message(),
        }
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sends probes to the webhook, one at a time
pub struct ConnectionTester {
    client: Arc<dyn WebhookClient>,
    settings: SharedSettings,
    busy: AtomicBool,
}

impl ConnectionTester {
    pub fn new(client: Arc<dyn WebhookClient>, settings: SharedSettings) -> Self {
        Self {
            client,
            settings,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Probe the webhook URL currently in the settings
    pub async fn test_configured(&self) -> Result<ConnectionOutcome> {
        let url = self.settings.webhook_url();
        self.test_connection(&url).await
    }

    /// Probe `url`
    ///
    /// Only a blank URL or a probe already in flight produce `Err`; any
    /// network result comes back as a [`ConnectionOutcome`].
    pub async fn test_connection(&self, url: &str) -> Result<ConnectionOutcome> {
        if url.trim().is_empty() {
            return Err(Error::empty_webhook());
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Busy("A connection test is already running".to_string()));
        }

        let _guard = BusyGuard(&self.busy);
        Ok(self.probe(url).await)
    }

    async fn probe(&self, url: &str) -> ConnectionOutcome {
        let body = match serde_json::to_value(ConnectionProbe::new()) {
            Ok(body) => body,
            Err(e) => return ConnectionOutcome::Disconnected(e.into()),
        };
        let attempt = self.settings.begin_attempt(AttemptKind::Probe);
        info!("Testing webhook connection: {}", url);

        let outcome = match self.client.post_json(url, &body).await {
            Ok(response) if response.is_success() => ConnectionOutcome::Connected {
                status: response.status,
            },
            Ok(response) => ConnectionOutcome::Disconnected(Error::Server {
                status: response.status,
                body: response.body,
            }),
            Err(e) => ConnectionOutcome::Disconnected(e),
        };

        if let ConnectionOutcome::Disconnected(e) = &outcome {
            warn!("Webhook connection test failed: {}", e);
        }
        attempt.settle(outcome.is_connected());
        outcome
    }
}
