//! # contract-desk
//!
//! Client side of a contract review dashboard. The actual analysis happens
//! in an external webhook; this crate keeps the webhook settings, probes the
//! webhook, submits contract text to it and holds the reply.
//!
//! ## Usage
//!
//! ```bash
//! contract-desk settings set --webhook-url https://n8n.example.com/webhook/contract-analysis
//! contract-desk test-connection
//! contract-desk analyze --file contract.txt
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based abstraction over the webhook HTTP call
//! - `analysis` - Analysis submission, results and demo reports
//! - `cli` - Command-line front-end
//! - `config` - Application configuration
//! - `connection` - Webhook reachability probe
//! - `error` - Error type shared by the library
//! - `intake` - Reading uploaded contract files
//! - `settings` - Persisted webhook settings and the connection flag
pub mod abstractions;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod intake;
pub mod settings;

pub use error::{Error, Result};
