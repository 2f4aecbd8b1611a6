//! HTTP handlers for the triage service.

pub mod health;
pub mod metrics;
pub mod recommend;
