use crate::services::providers::gemini::GEMINI_API_BASE;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default model when `TRIAGE_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default upstream request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct TriageConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub model: ModelConfig,
    /// Answer model failures with 200 instead of 500.
    pub legacy_error_status: bool,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Absent keys are tolerated at startup; requests then fail individually.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub provider: ProviderKind,
    pub name: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<i32>,
}

impl ModelConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Which [`TextProvider`](crate::services::TextProvider) backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

impl TriageConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty());

        let name = lookup("TRIAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if name.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "TRIAGE_MODEL must not be empty"
            )));
        }

        Ok(TriageConfig {
            common,
            google: GoogleConfig { api_key },
            model: ModelConfig {
                provider: parse_var(&lookup, "TRIAGE_PROVIDER")?.unwrap_or(ProviderKind::Gemini),
                name,
                api_base: lookup("TRIAGE_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                request_timeout_secs: parse_var(&lookup, "TRIAGE_REQUEST_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
                temperature: parse_var(&lookup, "TRIAGE_TEMPERATURE")?,
                max_output_tokens: parse_var(&lookup, "TRIAGE_MAX_OUTPUT_TOKENS")?,
            },
            legacy_error_status: parse_var(&lookup, "TRIAGE_LEGACY_ERROR_STATUS")?
                .unwrap_or(false),
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<TriageConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TriageConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();

        assert!(config.google.api_key.is_none());
        assert_eq!(config.model.provider, ProviderKind::Gemini);
        assert_eq!(config.model.name, DEFAULT_MODEL);
        assert_eq!(config.model.api_base, GEMINI_API_BASE);
        assert_eq!(config.model.request_timeout(), Duration::from_secs(120));
        assert!(config.model.temperature.is_none());
        assert!(!config.legacy_error_status);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("GOOGLE_API_KEY", "secret"),
            ("TRIAGE_PROVIDER", "Mock"),
            ("TRIAGE_MODEL", "gemini-pro"),
            ("TRIAGE_REQUEST_TIMEOUT_SECS", "30"),
            ("TRIAGE_TEMPERATURE", "0.1"),
            ("TRIAGE_MAX_OUTPUT_TOKENS", "16"),
            ("TRIAGE_LEGACY_ERROR_STATUS", "true"),
        ])
        .unwrap();

        assert_eq!(config.google.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model.provider, ProviderKind::Mock);
        assert_eq!(config.model.name, "gemini-pro");
        assert_eq!(config.model.request_timeout_secs, 30);
        assert_eq!(config.model.temperature, Some(0.1));
        assert_eq!(config.model.max_output_tokens, Some(16));
        assert!(config.legacy_error_status);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = load(&[("GOOGLE_API_KEY", "  ")]).unwrap();
        assert!(config.google.api_key.is_none());
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            load(&[("TRIAGE_REQUEST_TIMEOUT_SECS", "soon")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            load(&[("TRIAGE_PROVIDER", "openai")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            load(&[("TRIAGE_MODEL", "")]),
            Err(AppError::ConfigError(_))
        ));
    }
}
