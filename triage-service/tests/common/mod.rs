#![allow(dead_code)]

use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use triage_service::config::{GoogleConfig, ModelConfig, ProviderKind, TriageConfig};
use triage_service::services::providers::gemini::GEMINI_API_BASE;
use triage_service::services::TextProvider;
use triage_service::startup::{build_router, AppState, Application};

pub fn test_config() -> TriageConfig {
    TriageConfig {
        common: CoreConfig {
            port: 0, // Random port
            log_level: "debug".to_string(),
        },
        google: GoogleConfig { api_key: None },
        model: ModelConfig {
            provider: ProviderKind::Mock,
            name: "gemini-2.0-flash".to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            request_timeout_secs: 5,
            temperature: None,
            max_output_tokens: None,
        },
        legacy_error_status: false,
        otlp_endpoint: None,
    }
}

pub fn router(config: TriageConfig, provider: Arc<dyn TextProvider>) -> axum::Router {
    build_router(AppState::new(config, provider))
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application on a random port with the given config.
    pub async fn spawn(config: TriageConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/health", address)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }
}
