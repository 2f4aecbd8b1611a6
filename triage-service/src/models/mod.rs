//! Request and response bodies for the triage API.

pub mod patient;

pub use patient::{ErrorResponse, PatientInput, TriageResponse};
