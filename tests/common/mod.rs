//! Common test utilities and helpers

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Bodies received by the local webhook, in order
pub type Received = Arc<Mutex<Vec<(String, Value)>>>;

/// A local stand-in for the analysis webhook
pub struct TestWebhook {
    pub addr: SocketAddr,
    pub received: Received,
}

impl TestWebhook {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }
}

fn record(received: &Received, route: &str, body: Value) {
    received.lock().unwrap().push((route.to_string(), body));
}

/// Start the webhook on an ephemeral port
///
/// Routes:
/// - `POST /ok` replies 200 `OK: low risk`
/// - `POST /report` replies 200 with a JSON report
/// - `POST /fail` replies 500
pub async fn spawn_webhook() -> TestWebhook {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/ok",
            post(|State(r): State<Received>, Json(body): Json<Value>| async move {
                record(&r, "/ok", body);
                (StatusCode::OK, "OK: low risk".to_string())
            }),
        )
        .route(
            "/report",
            post(|State(r): State<Received>, Json(body): Json<Value>| async move {
                record(&r, "/report", body);
                (
                    StatusCode::OK,
                    r#"{"risk_score": 82, "issues_detected": 4, "clause_types": ["Liability"], "recommendations": ["Cap liability"]}"#
                        .to_string(),
                )
            }),
        )
        .route(
            "/fail",
            post(|State(r): State<Received>, Json(body): Json<Value>| async move {
                record(&r, "/fail", body);
                (StatusCode::INTERNAL_SERVER_ERROR, "workflow crashed".to_string())
            }),
        )
        .with_state(Arc::clone(&received));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestWebhook { addr, received }
}

/// A URL nothing listens on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/webhook")
}
