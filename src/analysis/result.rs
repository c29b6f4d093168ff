//! Analysis results and their optional structured reading

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Raw reply of a successful analysis, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub raw: String,
    pub file_name: String,
    pub received_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(raw: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            file_name: file_name.into(),
            received_at: Utc::now(),
        }
    }

    /// Structured view of the reply, when it is a JSON object
    ///
    /// Each field is read on its own; one that is missing or of the wrong
    /// type is left empty without affecting the others.
    pub fn report(&self) -> Option<AnalysisReport> {
        match serde_json::from_str::<Value>(&self.raw) {
            Ok(Value::Object(fields)) => Some(AnalysisReport::from_fields(&fields)),
            _ => None,
        }
    }
}

/// A JSON number, or a string holding one
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Fields the dashboard knows how to display; all optional on the wire
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub risk_score: Option<u32>,
    pub issues_detected: Option<u32>,
    pub clause_types: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        let field = |name: &str| fields.get(name).unwrap_or(&Value::Null);
        Self {
            // Scores are percentages; fractions round to the nearest point
            risk_score: number(field("risk_score"))
                .map(|score| score.round().clamp(0.0, 100.0) as u32),
            issues_detected: number(field("issues_detected"))
                .map(|count| count.round().max(0.0) as u32),
            clause_types: strings(field("clause_types")),
            recommendations: strings(field("recommendations")),
        }
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_score.map(RiskLevel::from_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{label}")
    }
}
