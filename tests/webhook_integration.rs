//! End-to-end tests against a local webhook over real HTTP

mod common;

use contract_desk::abstractions::{ReqwestWebhookClient, WebhookClient};
use contract_desk::analysis::{AnalysisSubmitter, RiskLevel, ANALYSIS_SOURCE, PROBE_SOURCE};
use contract_desk::connection::ConnectionTester;
use contract_desk::error::Error;
use contract_desk::intake::ContractDraft;
use contract_desk::settings::{JsonFileStore, SettingsStore, SharedSettings};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn setup(temp_dir: &TempDir) -> (SharedSettings, Arc<dyn WebhookClient>) {
    let store = SettingsStore::new(JsonFileStore::new(temp_dir.path().join("settings.json")));
    let client = ReqwestWebhookClient::new(Some(Duration::from_secs(10))).unwrap();
    (SharedSettings::new(store), Arc::new(client))
}

#[tokio::test]
async fn test_probe_and_submit_against_live_webhook() {
    let webhook = common::spawn_webhook().await;
    let temp_dir = TempDir::new().unwrap();
    let (settings, client) = setup(&temp_dir);
    settings.set_webhook_url(webhook.url("/ok"));

    let tester = ConnectionTester::new(Arc::clone(&client), settings.clone());
    assert!(tester.test_configured().await.unwrap().is_connected());
    assert!(settings.is_connected());

    let submitter = AnalysisSubmitter::new(client, settings.clone());
    let result = submitter
        .submit_draft(&ContractDraft::from_text("The Supplier shall..."))
        .await
        .unwrap();
    assert_eq!(result.raw, "OK: low risk");

    let received = webhook.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].1["test"], true);
    assert_eq!(received[0].1["source"], PROBE_SOURCE);
    assert_eq!(received[1].1["contract_text"], "The Supplier shall...");
    assert_eq!(received[1].1["file_name"], "contract.txt");
    assert_eq!(received[1].1["source"], ANALYSIS_SOURCE);
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let webhook = common::spawn_webhook().await;
    let temp_dir = TempDir::new().unwrap();
    let (settings, client) = setup(&temp_dir);

    let submitter = AnalysisSubmitter::new(client, settings.clone());
    let err = submitter
        .submit("Terms", None, &webhook.url("/fail"))
        .await
        .unwrap_err();

    match &err {
        Error::Server { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "workflow crashed");
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert!(err.user_message().contains("500"));
    assert!(submitter.current_result().is_none());
    assert!(!settings.is_connected());
}

#[tokio::test]
async fn test_structured_reply_is_readable() {
    let webhook = common::spawn_webhook().await;
    let temp_dir = TempDir::new().unwrap();
    let (settings, client) = setup(&temp_dir);

    let submitter = AnalysisSubmitter::new(client, settings);
    let result = submitter
        .submit("Terms", Some("msa.txt"), &webhook.url("/report"))
        .await
        .unwrap();

    let report = result.report().unwrap();
    assert_eq!(report.risk_score, Some(82));
    assert_eq!(report.risk_level(), Some(RiskLevel::High));
    assert_eq!(report.recommendations, vec!["Cap liability".to_string()]);
    assert_eq!(webhook.received()[0].1["file_name"], "msa.txt");
}

#[tokio::test]
async fn test_unreachable_webhook_settles_disconnected() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, client) = setup(&temp_dir);
    let url = common::unreachable_url();

    let tester = ConnectionTester::new(Arc::clone(&client), settings.clone());
    let outcome = tester.test_connection(&url).await.unwrap();
    assert!(!outcome.is_connected());
    assert!(!settings.is_connected());

    let submitter = AnalysisSubmitter::new(client, settings.clone());
    let err = submitter.submit("Terms", None, &url).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(!submitter.is_busy());
}

#[tokio::test]
async fn test_uploaded_file_name_reaches_webhook() {
    let webhook = common::spawn_webhook().await;
    let temp_dir = TempDir::new().unwrap();
    let (settings, client) = setup(&temp_dir);
    settings.set_webhook_url(webhook.url("/ok"));

    let path = temp_dir.path().join("contract.txt");
    std::fs::write(&path, "Hello").unwrap();
    let mut draft = ContractDraft::default();
    draft.load_file(&path).await.unwrap();
    assert_eq!(draft.contract_text, "Hello");

    let submitter = AnalysisSubmitter::new(client, settings);
    submitter.submit_draft(&draft).await.unwrap();

    let received = webhook.received();
    assert_eq!(received[0].1["contract_text"], "Hello");
    assert_eq!(received[0].1["file_name"], "contract.txt");
}
