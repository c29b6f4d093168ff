//! Text and JSON renderings of settings and analysis results

use serde_json::json;

use crate::analysis::{AnalysisReport, AnalysisResult, DemoReport};
use crate::settings::Settings;

pub fn render_settings(settings: &Settings) -> String {
    let url = if settings.webhook_url.is_empty() {
        "(not set)"
    } else {
        settings.webhook_url.as_str()
    };
    let key = if settings.api_key.is_empty() {
        "(not set)".to_string()
    } else {
        settings.masked_api_key()
    };
    format!(
        "Webhook URL: {url}\nAPI key:     {key}\nConnected:   {}",
        if settings.is_connected { "yes" } else { "no" }
    )
}

pub fn settings_json(settings: &Settings) -> serde_json::Value {
    json!({
        "webhook_url": settings.webhook_url,
        "api_key": settings.masked_api_key(),
        "is_connected": settings.is_connected,
    })
}

fn render_report(report: &AnalysisReport) -> String {
    let mut lines = Vec::new();
    if let Some(score) = report.risk_score {
        let level = report
            .risk_level()
            .map(|l| l.to_string())
            .unwrap_or_default();
        lines.push(format!("Overall risk score: {score}/100 ({level} Risk)"));
    }
    if let Some(issues) = report.issues_detected {
        lines.push(format!("Issues detected:    {issues}"));
    }
    if !report.clause_types.is_empty() {
        lines.push(format!("Flagged clauses:    {}", report.clause_types.join(", ")));
    }
    if !report.recommendations.is_empty() {
        lines.push("Recommendations:".to_string());
        for rec in &report.recommendations {
            lines.push(format!("  - {rec}"));
        }
    }
    lines.join("\n")
}

pub fn render_result(result: &AnalysisResult) -> String {
    match result.report() {
        Some(report) => format!(
            "Analysis of {}\n{}",
            result.file_name,
            render_report(&report)
        ),
        None => result.raw.clone(),
    }
}

pub fn result_json(result: &AnalysisResult) -> serde_json::Value {
    json!({
        "demo": false,
        "file_name": result.file_name,
        "received_at": result.received_at,
        "raw": result.raw,
        "report": result.report(),
    })
}

pub fn render_demo(demo: &DemoReport) -> String {
    format!(
        "[{}] Placeholder analysis, not produced by the webhook\n{}",
        DemoReport::LABEL,
        render_report(&demo.report)
    )
}

pub fn demo_json(demo: &DemoReport) -> serde_json::Value {
    json!({
        "demo": true,
        "report": demo.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_result_is_printed_verbatim() {
        let result = AnalysisResult::new("OK: low risk", "contract.txt");
        assert_eq!(render_result(&result), "OK: low risk");
    }

    #[test]
    fn test_structured_result() {
        let result = AnalysisResult::new(
            r#"{"risk_score": 45, "recommendations": ["Cap liability"]}"#,
            "nda.txt",
        );
        let text = render_result(&result);
        assert!(text.contains("nda.txt"));
        assert!(text.contains("45/100 (Medium Risk)"));
        assert!(text.contains("- Cap liability"));
    }

    #[test]
    fn test_demo_is_labelled() {
        let demo = crate::analysis::demo_report();
        assert!(render_demo(&demo).starts_with("[DEMO]"));
        assert_eq!(demo_json(&demo)["demo"], true);
    }

    #[test]
    fn test_settings_hide_api_key() {
        let settings = Settings {
            webhook_url: "https://hooks.example.com".to_string(),
            api_key: "super-secret".to_string(),
            is_connected: false,
        };
        let text = render_settings(&settings);
        assert!(!text.contains("super-secret"));
        assert!(text.contains("Connected:   no"));
        assert_eq!(settings_json(&settings)["api_key"], "********cret");
    }
}
