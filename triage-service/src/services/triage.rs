//! Prompt rendering and the recommend flow.

use super::metrics;
use super::providers::{GenerationParams, ProviderError, TextProvider};
use crate::models::{ErrorResponse, PatientInput, TriageResponse};
use std::time::Instant;
use thiserror::Error;

/// Fixed instruction sent to the model. `{age}`, `{gender}` and `{symptoms}`
/// are substituted by [`render_prompt`].
pub const PROMPT_TEMPLATE: &str = "
You are a professional Medical Triage Assistant AI.
Your task is to recommend ONE specific hospital department based on patient symptoms.
ANSWER ONLY WITH THE DEPARTMENT NAME. No explanation needed.

Examples:
Neurology
Cardiology
Gastroenterology

Patient Info:
- Age: {age}
- Gender: {gender}
- Symptoms: {symptoms}

Recommended Department (One Word):
";

/// Message placed in the `error` field of every failed recommendation.
pub const RECOMMENDATION_FAILED: &str = "Failed to process AI recommendation";

/// Render the triage prompt for one patient.
pub fn render_prompt(input: &PatientInput) -> String {
    // Single pass so a substituted value containing `{gender}` etc. is left alone
    let mut out = String::with_capacity(PROMPT_TEMPLATE.len() + 64);
    let mut rest = PROMPT_TEMPLATE;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let (value, consumed) = if tail.starts_with("{age}") {
            (input.age.to_string(), "{age}".len())
        } else if tail.starts_with("{gender}") {
            (input.gender.clone(), "{gender}".len())
        } else if tail.starts_with("{symptoms}") {
            (input.symptoms_text(), "{symptoms}".len())
        } else {
            ("{".to_string(), 1)
        };

        out.push_str(&value);
        rest = &tail[consumed..];
    }

    out.push_str(rest);
    out
}

/// Model invocation failed. Carries the provider error for `details`.
#[derive(Debug, Error)]
#[error("Failed to process AI recommendation: {source}")]
pub struct TriageError {
    #[source]
    source: ProviderError,
}

impl TriageError {
    pub fn provider_error(&self) -> &ProviderError {
        &self.source
    }

    /// Wire body: the fixed message plus the stringified provider error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: RECOMMENDATION_FAILED.to_string(),
            details: self.source.to_string(),
        }
    }
}

impl From<ProviderError> for TriageError {
    fn from(source: ProviderError) -> Self {
        Self { source }
    }
}

/// Ask the provider for a department and trim the answer.
pub async fn recommend(
    provider: &dyn TextProvider,
    params: &GenerationParams,
    input: &PatientInput,
) -> Result<TriageResponse, TriageError> {
    let prompt = render_prompt(input);

    let start = Instant::now();
    let result = provider.generate(&prompt, params).await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        start.elapsed().as_secs_f64(),
    );

    match result {
        Ok(response) => {
            tracing::debug!(
                provider = provider.name(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                "Provider returned recommendation"
            );

            Ok(TriageResponse {
                recommended_department: response.text.trim().to_string(),
            })
        }
        Err(e) => {
            metrics::record_provider_error(provider.name(), e.kind());
            Err(e.into())
        }
    }
}
