//! Services implementing the orchestration and polling contracts.

mod orchestrator;
mod poller;

pub use orchestrator::JobOrchestrator;
pub use poller::JobPoller;

use jobflow_types::error::JobError;

/// Default delay before the first completion poll.
pub const DEFAULT_POLL_DELAY: std::time::Duration = std::time::Duration::from_secs(30);

/// Extract a required, non-blank request field.
fn required(value: Option<String>, field: &str) -> Result<String, JobError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(JobError::InvalidRequest(format!(
            "missing required parameter: {field}"
        ))),
    }
}
