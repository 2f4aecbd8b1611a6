//! End-to-end tests against a spawned server.

mod common;

use common::{test_config, TestApp};
use serde_json::json;
use std::time::Duration;
use triage_service::config::ProviderKind;

#[tokio::test]
async fn root_returns_banner() {
    let app = TestApp::spawn(test_config()).await;

    let response = app
        .client
        .get(format!("{}/", app.address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({ "message": "AI Triage System is running successfully." })
    );
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn(test_config()).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "triage-service");
}

#[tokio::test]
async fn missing_api_key_does_not_prevent_startup() {
    let mut config = test_config();
    config.model.provider = ProviderKind::Gemini;
    config.google.api_key = None;

    let app = TestApp::spawn(config).await;

    let root = app
        .client
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(root.status().as_u16(), 200);

    let response = app
        .client
        .post(format!("{}/recommend", app.address))
        .json(&json!({
            "gender": "female",
            "age": 34,
            "symptoms": ["chest pain", "shortness of breath"]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({
            "error": "Failed to process AI recommendation",
            "details": "Provider not configured: GOOGLE_API_KEY is not set"
        })
    );

    let ready = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(ready.status().as_u16(), 503);
}

#[tokio::test]
async fn mock_provider_serves_recommendations() {
    let app = TestApp::spawn(test_config()).await;

    let response = app
        .client
        .post(format!("{}/recommend", app.address))
        .json(&json!({ "gender": "male", "age": 70, "symptoms": ["dizziness"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "recommended_department": "General Medicine" }));
}
