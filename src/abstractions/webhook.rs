//! Webhook HTTP abstraction layer
//!
//! Every outbound call this crate makes is the same shape: POST a JSON body
//! to the configured webhook and look at the status and the raw response
//! text. [`WebhookClient`] captures exactly that, so the connection tester
//! and the submitter can be driven by [`MockWebhookClient`] in tests.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info};

/// Status and raw body of a webhook reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for the single outbound call: POST JSON, read status and text
///
/// Implementations return `Ok` whenever a response was received, whatever
/// its status, and `Err(Error::Transport)` when no response was obtained.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse>;
}

/// `reqwest`-backed webhook client
pub struct ReqwestWebhookClient {
    client: Client,
}

impl ReqwestWebhookClient {
    /// Create a client; `None` leaves the transport's default timeout in place
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookClient for ReqwestWebhookClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse> {
        let target = url::Url::parse(url.trim())
            .map_err(|e| Error::Transport(format!("Invalid webhook URL {url:?}: {e}")))?;

        info!("Posting to webhook {}", target);
        let response = self
            .client
            .post(target)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Webhook request failed: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read webhook response: {}", e)))?;
        debug!("Webhook replied with HTTP {} ({} bytes)", status, text.len());

        Ok(WebhookResponse { status, body: text })
    }
}

/// Type alias for recorded webhook calls
type RecordedCalls = Arc<Mutex<Vec<(String, Value)>>>;

/// Mock implementation of `WebhookClient` for testing
#[derive(Clone)]
pub struct MockWebhookClient {
    /// Scripted replies, consumed front to back
    pub responses: Arc<Mutex<VecDeque<Result<WebhookResponse>>>>,
    /// Every call made, in order
    pub calls: RecordedCalls,
    /// When set, each call waits for a notification before replying
    pub gate: Option<Arc<Notify>>,
}

impl MockWebhookClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// A mock whose calls stay pending until the returned handle is notified
    #[must_use]
    pub fn held() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut mock = Self::new();
        mock.gate = Some(Arc::clone(&gate));
        (mock, gate)
    }

    pub async fn add_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .await
            .push_back(Ok(WebhookResponse::new(status, body)));
    }

    pub async fn add_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .await
            .push_back(Err(Error::Transport(message.to_string())));
    }

    pub async fn get_calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockWebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookClient for MockWebhookClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse> {
        self.calls
            .lock()
            .await
            .push((url.to_string(), body.clone()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("No mock response configured".to_string())))
    }
}
