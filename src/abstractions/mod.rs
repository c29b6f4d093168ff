//! Abstraction layers for external dependencies
//!
//! This module provides trait-based abstractions for the analysis webhook
//! to enable testing and dependency injection.

pub mod webhook;

pub use webhook::{MockWebhookClient, ReqwestWebhookClient, WebhookClient, WebhookResponse};
