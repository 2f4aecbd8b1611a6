pub mod metrics;
pub mod providers;
pub mod triage;

pub use providers::{GenerationParams, ProviderError, TextProvider};
pub use triage::{recommend, render_prompt, TriageError};
