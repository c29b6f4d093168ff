use thiserror::Error;

/// Message shown when an analysis is requested without any contract text
pub const EMPTY_CONTRACT_MESSAGE: &str = "Please enter contract text or upload a file";

/// Message shown when a network action is requested without a webhook URL
pub const EMPTY_WEBHOOK_MESSAGE: &str = "Please configure the webhook URL";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Webhook returned HTTP {status}")]
    Server { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Busy: {0}")]
    Busy(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn empty_contract() -> Self {
        Error::Validation(EMPTY_CONTRACT_MESSAGE.to_string())
    }

    pub fn empty_webhook() -> Self {
        Error::Validation(EMPTY_WEBHOOK_MESSAGE.to_string())
    }

    /// Text suitable for the user-facing notification of a failed action
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Busy(msg) => msg.clone(),
            Error::Server { status, .. } => format!("Webhook returned HTTP {status}"),
            Error::Transport(_) => {
                "Webhook unreachable, check the URL and your network".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether the error came from a network attempt (and so downgrades the connection flag)
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Server { .. } | Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
