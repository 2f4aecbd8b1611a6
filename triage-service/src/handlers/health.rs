use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Root banner. Always succeeds, whatever the provider state.
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "AI Triage System is running successfully." }))
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "triage-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check endpoint for K8s readiness probes.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    match state.text_provider.health_check().await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            tracing::warn!(
                provider = state.text_provider.name(),
                error = %e,
                "Provider not ready"
            );
            Err(AppError::ServiceUnavailable)
        }
    }
}
