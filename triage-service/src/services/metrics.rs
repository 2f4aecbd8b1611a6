//! Prometheus metrics for triage-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

// Global registry and collectors, set together
static METRICS: OnceLock<Metrics> = OnceLock::new();

struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    provider_latency: HistogramVec,
    provider_errors: IntCounterVec,
}

fn build_metrics() -> Result<Metrics, prometheus::Error> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("triage_requests_total", "Total triage recommendation requests"),
        &["outcome"], // outcome: success, provider_error, invalid
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "triage_provider_latency_seconds",
            "AI provider API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )?;

    let provider_errors = IntCounterVec::new(
        Opts::new("triage_provider_errors_total", "Total AI provider errors"),
        &["provider", "error_type"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(provider_errors.clone()))?;

    Ok(Metrics {
        registry,
        requests_total,
        provider_latency,
        provider_errors,
    })
}

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS.get().is_some() {
        return;
    }

    match build_metrics() {
        Ok(metrics) => {
            if METRICS.set(metrics).is_ok() {
                tracing::info!("Prometheus metrics initialized");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to initialize metrics"),
    }
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match METRICS.get() {
        Some(m) => &m.registry,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record the outcome of a `/recommend` call.
pub fn record_request(outcome: &str) {
    if let Some(m) = METRICS.get() {
        m.requests_total.with_label_values(&[outcome]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.provider_latency
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(m) = METRICS.get() {
        m.provider_errors.with_label_values(&[provider, error_type]).inc();
    }
}
