//! Sends contract text to the webhook and keeps the current result

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::abstractions::WebhookClient;
use crate::error::{Error, Result};
use crate::intake::ContractDraft;
use crate::settings::{AttemptKind, SharedSettings};

use super::request::AnalysisRequest;
use super::result::AnalysisResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

#[derive(Default)]
struct SubmitterState {
    phase: SubmissionPhase,
    last_outcome: Option<SubmissionPhase>,
    current: Option<AnalysisResult>,
}

/// Submits one analysis at a time and holds at most one result
pub struct AnalysisSubmitter {
    client: Arc<dyn WebhookClient>,
    settings: SharedSettings,
    busy: AtomicBool,
    state: Mutex<SubmitterState>,
}

/// Returns the submitter to `Idle` however the attempt ends
struct SendingGuard<'a> {
    submitter: &'a AnalysisSubmitter,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.submitter.state().phase = SubmissionPhase::Idle;
        self.submitter.busy.store(false, Ordering::SeqCst);
    }
}

impl AnalysisSubmitter {
    pub fn new(client: Arc<dyn WebhookClient>, settings: SharedSettings) -> Self {
        Self {
            client,
            settings,
            busy: AtomicBool::new(false),
            state: Mutex::new(SubmitterState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SubmitterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state().phase
    }

    /// How the most recent attempt ended, if one has
    pub fn last_outcome(&self) -> Option<SubmissionPhase> {
        self.state().last_outcome
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn current_result(&self) -> Option<AnalysisResult> {
        self.state().current.clone()
    }

    /// Whether the "review" action is enabled for these inputs
    pub fn can_submit(&self, draft: &ContractDraft, webhook_url: &str) -> bool {
        !self.is_busy() && !(draft.is_blank() && webhook_url.trim().is_empty())
    }

    /// Submit the draft to the webhook URL currently in the settings
    pub async fn submit_draft(&self, draft: &ContractDraft) -> Result<AnalysisResult> {
        let webhook_url = self.settings.webhook_url();
        self.submit(&draft.contract_text, draft.file_name.as_deref(), &webhook_url)
            .await
    }

    pub async fn submit(
        &self,
        contract_text: &str,
        file_name: Option<&str>,
        webhook_url: &str,
    ) -> Result<AnalysisResult> {
        if contract_text.trim().is_empty() {
            return Err(Error::empty_contract());
        }
        if webhook_url.trim().is_empty() {
            return Err(Error::empty_webhook());
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Submission rejected: another analysis is in flight");
            return Err(Error::Busy(
                "An analysis is already in progress".to_string(),
            ));
        }
        let _guard = SendingGuard { submitter: self };

        {
            let mut state = self.state();
            state.phase = SubmissionPhase::Sending;
            state.current = None;
        }

        let request = AnalysisRequest::new(contract_text, file_name);
        let body = serde_json::to_value(&request)?;
        let attempt = self.settings.begin_attempt(AttemptKind::Submission);
        info!("Sending contract to webhook: {}", webhook_url);

        let outcome = match self.client.post_json(webhook_url, &body).await {
            Ok(response) if response.is_success() => {
                Ok(AnalysisResult::new(response.body, request.file_name))
            }
            Ok(response) => Err(Error::Server {
                status: response.status,
                body: response.body,
            }),
            Err(e) => Err(e),
        };

        attempt.settle(outcome.is_ok());
        {
            let mut state = self.state();
            match &outcome {
                Ok(result) => {
                    info!("Analysis complete ({} bytes)", result.raw.len());
                    state.phase = SubmissionPhase::Succeeded;
                    state.last_outcome = Some(SubmissionPhase::Succeeded);
                    state.current = Some(result.clone());
                }
                Err(e) => {
                    error!("Error analyzing contract: {}", e);
                    state.phase = SubmissionPhase::Failed;
                    state.last_outcome = Some(SubmissionPhase::Failed);
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::MockWebhookClient;
    use crate::settings::{MemoryStore, SettingsStore};

    const URL: &str = "https://n8n.example.com/webhook/contract-analysis";

    fn fixture(mock: &MockWebhookClient) -> (AnalysisSubmitter, SharedSettings) {
        let settings = SharedSettings::new(SettingsStore::new(MemoryStore::new()));
        settings.set_webhook_url(URL);
        let submitter = AnalysisSubmitter::new(Arc::new(mock.clone()), settings.clone());
        (submitter, settings)
    }

    #[tokio::test]
    async fn test_blank_contract_is_rejected_without_network() {
        let mock = MockWebhookClient::new();
        let (submitter, _) = fixture(&mock);

        for text in ["", "   ", "\n\t "] {
            let err = submitter.submit(text, None, URL).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
            assert_eq!(err.user_message(), crate::error::EMPTY_CONTRACT_MESSAGE);
        }
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_blank_url_is_rejected_without_network() {
        let mock = MockWebhookClient::new();
        let (submitter, _) = fixture(&mock);

        for url in ["", "  "] {
            let err = submitter.submit("Terms", None, url).await.unwrap_err();
            assert_eq!(err.user_message(), crate::error::EMPTY_WEBHOOK_MESSAGE);
        }
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_success_stores_raw_text_and_connects() {
        let mock = MockWebhookClient::new();
        mock.add_response(200, "OK: low risk").await;
        let (submitter, settings) = fixture(&mock);

        let result = submitter.submit("Terms", None, URL).await.unwrap();

        assert_eq!(result.raw, "OK: low risk");
        assert_eq!(submitter.current_result().unwrap().raw, "OK: low risk");
        assert!(settings.is_connected());
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
        assert_eq!(submitter.last_outcome(), Some(SubmissionPhase::Succeeded));
    }

    #[tokio::test]
    async fn test_server_error_clears_result_and_disconnects() {
        let mock = MockWebhookClient::new();
        mock.add_response(200, "first").await;
        mock.add_response(500, "Internal Server Error").await;
        let (submitter, settings) = fixture(&mock);

        submitter.submit("Terms", None, URL).await.unwrap();
        let err = submitter.submit("Terms", None, URL).await.unwrap_err();

        assert!(err.user_message().contains("500"));
        assert!(submitter.current_result().is_none());
        assert!(!settings.is_connected());
        assert_eq!(submitter.last_outcome(), Some(SubmissionPhase::Failed));
        assert!(!submitter.is_busy());
    }

    #[tokio::test]
    async fn test_transport_error_disconnects() {
        let mock = MockWebhookClient::new();
        mock.add_transport_error("connection refused").await;
        let (submitter, settings) = fixture(&mock);

        let err = submitter.submit("Terms", None, URL).await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert!(submitter.current_result().is_none());
        assert!(!settings.is_connected());
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_request_body_shape() {
        let mock = MockWebhookClient::new();
        mock.add_response(200, "{}").await;
        let (submitter, _) = fixture(&mock);

        submitter.submit("Hello", Some("nda.txt"), URL).await.unwrap();

        let calls = mock.get_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, URL);
        assert_eq!(calls[0].1["contract_text"], "Hello");
        assert_eq!(calls[0].1["file_name"], "nda.txt");
        assert_eq!(calls[0].1["source"], "ontop-legal-dashboard");
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let (mock, gate) = MockWebhookClient::held();
        mock.add_response(200, "done").await;
        let (submitter, _) = fixture(&mock);
        let submitter = Arc::new(submitter);

        let first = {
            let submitter = Arc::clone(&submitter);
            tokio::spawn(async move { submitter.submit("Terms", None, URL).await })
        };

        while mock.call_count().await == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(submitter.phase(), SubmissionPhase::Sending);
        assert!(submitter.current_result().is_none());

        let second = submitter.submit("Terms", None, URL).await;
        assert!(matches!(second, Err(Error::Busy(_))));

        gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.raw, "done");
        assert_eq!(mock.call_count().await, 1);
        assert!(!submitter.is_busy());
    }

    #[tokio::test]
    async fn test_new_submission_clears_previous_result_immediately() {
        let (mock, gate) = MockWebhookClient::held();
        mock.add_response(200, "old").await;
        mock.add_response(200, "new").await;
        let (submitter, _) = fixture(&mock);
        let submitter = Arc::new(submitter);

        gate.notify_one();
        submitter.submit("Terms", None, URL).await.unwrap();
        assert_eq!(submitter.current_result().unwrap().raw, "old");

        let pending = {
            let submitter = Arc::clone(&submitter);
            tokio::spawn(async move { submitter.submit("Terms", None, URL).await })
        };
        while mock.call_count().await < 2 {
            tokio::task::yield_now().await;
        }
        assert!(submitter.current_result().is_none());

        gate.notify_one();
        pending.await.unwrap().unwrap();
        assert_eq!(submitter.current_result().unwrap().raw, "new");
    }

    #[tokio::test]
    async fn test_submit_draft_uses_settings_url_and_file_name() {
        let mock = MockWebhookClient::new();
        mock.add_response(200, "ok").await;
        let (submitter, _) = fixture(&mock);

        let mut draft = ContractDraft::from_text("Hello");
        draft.file_name = Some("contract.txt".to_string());
        let result = submitter.submit_draft(&draft).await.unwrap();

        assert_eq!(result.file_name, "contract.txt");
        let calls = mock.get_calls().await;
        assert_eq!(calls[0].0, URL);
        assert_eq!(calls[0].1["file_name"], "contract.txt");
    }

    #[test]
    fn test_can_submit_rule() {
        let mock = MockWebhookClient::new();
        let (submitter, _) = fixture(&mock);

        assert!(!submitter.can_submit(&ContractDraft::default(), " "));
        assert!(submitter.can_submit(&ContractDraft::default(), URL));
        assert!(submitter.can_submit(&ContractDraft::from_text("x"), ""));
    }
}
