use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::models::PatientInput;
use crate::services::{self, metrics};
use crate::startup::AppState;

/// `POST /recommend`: suggest one hospital department for the patient.
///
/// Model failures are answered with the generic error body; the status is
/// 500 unless the service runs with `legacy_error_status`.
#[tracing::instrument(skip(state, payload), fields(age, symptom_count))]
pub async fn recommend_department(
    State(state): State<AppState>,
    payload: Result<Json<PatientInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload.map_err(|e| {
        metrics::record_request("invalid");
        AppError::from(e)
    })?;

    input.validate().map_err(|e| {
        metrics::record_request("invalid");
        AppError::from(e)
    })?;

    tracing::Span::current().record("age", input.age);
    tracing::Span::current().record("symptom_count", input.symptoms.len());

    match services::recommend(state.text_provider.as_ref(), &state.generation_params, &input).await
    {
        Ok(response) => {
            metrics::record_request("success");
            tracing::info!(
                department = %response.recommended_department,
                "Recommendation produced"
            );
            Ok((StatusCode::OK, Json(response)).into_response())
        }
        Err(e) => {
            metrics::record_request("provider_error");
            tracing::error!(
                error = %e,
                error_type = e.provider_error().kind(),
                "AI processing error"
            );

            let status = if state.config.legacy_error_status {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Ok((status, Json(e.to_response())).into_response())
        }
    }
}
