//! Request bodies sent to the webhook

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// `source` value carried by analysis submissions
pub const ANALYSIS_SOURCE: &str = "ontop-legal-dashboard";

/// `source` value carried by connection probes
pub const PROBE_SOURCE: &str = "ontop-legal-dashboard-test";

/// File name reported when the text did not come from a file
pub const DEFAULT_FILE_NAME: &str = "contract.txt";

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of an analysis submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub contract_text: String,
    pub file_name: String,
    pub timestamp: String,
    pub source: String,
}

impl AnalysisRequest {
    pub fn new(contract_text: &str, file_name: Option<&str>) -> Self {
        Self::at(contract_text, file_name, Utc::now())
    }

    pub fn at(contract_text: &str, file_name: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            contract_text: contract_text.to_string(),
            file_name: file_name.unwrap_or(DEFAULT_FILE_NAME).to_string(),
            timestamp: iso_timestamp(now),
            source: ANALYSIS_SOURCE.to_string(),
        }
    }
}

/// Body of a connection probe; carries no contract content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionProbe {
    pub test: bool,
    pub timestamp: String,
    pub source: String,
}

impl ConnectionProbe {
    pub fn new() -> Self {
        Self {
            test: true,
            timestamp: iso_timestamp(Utc::now()),
            source: PROBE_SOURCE.to_string(),
        }
    }
}

impl Default for ConnectionProbe {
    fn default() -> Self {
        Self::new()
    }
}
