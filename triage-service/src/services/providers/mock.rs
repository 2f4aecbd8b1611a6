//! Mock provider implementation for tests and credential-free local runs.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Reply used when running with `TRIAGE_PROVIDER=mock`.
pub const DEFAULT_MOCK_REPLY: &str = "General Medicine";

/// Mock text provider that returns a canned reply or a canned error.
///
/// Prompts are only kept when built with [`MockTextProvider::recording`].
pub struct MockTextProvider {
    outcome: Result<String, ProviderError>,
    prompts: Option<Mutex<Vec<String>>>,
}

impl MockTextProvider {
    /// Provider that answers every prompt with `reply`, verbatim.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
            prompts: None,
        }
    }

    /// Provider that fails every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            prompts: None,
        }
    }

    /// Keep every prompt received, for assertions in tests.
    pub fn recording(mut self) -> Self {
        self.prompts = Some(Mutex::new(Vec::new()));
        self
    }

    /// Prompts received so far, oldest first. Empty unless recording.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .as_ref()
            .and_then(|p| p.lock().ok().map(|p| p.clone()))
            .unwrap_or_default()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::with_reply(DEFAULT_MOCK_REPLY)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Some(Ok(mut prompts)) = self.prompts.as_ref().map(Mutex::lock) {
            prompts.push(prompt.to_string());
        }

        let text = self.outcome.clone()?;

        Ok(ProviderResponse {
            output_tokens: token_estimate(text.split_whitespace().count()),
            text,
            input_tokens: token_estimate(prompt.len() / 4),
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.outcome {
            Ok(_) => Ok(()),
            Err(e) => Err(e.clone()),
        }
    }
}

fn token_estimate(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
