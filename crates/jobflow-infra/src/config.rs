//! Environment-backed service configuration.
//!
//! Everything Jobflow needs to reach its collaborators comes from the
//! environment: GCP project coordinates, the delayed-task queue, the poll
//! callback URL and the AppSheet application id. Missing required variables
//! surface as [`JobError::Configuration`] at startup, not at request time.

use std::time::Duration;

use jobflow_types::error::JobError;

use jobflow_core::service::DEFAULT_POLL_DELAY;

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project id.
    pub project: String,
    /// GCP region the Dataform repository and task queue live in.
    pub location: String,
    /// Cloud Tasks queue that delivers delayed polls.
    pub queue: String,
    /// Absolute URL of the poll endpoint the queue posts back to.
    pub poll_url: String,
    /// AppSheet application id for completion records.
    pub appsheet_app_id: String,
    /// Delay before the first (or re-armed) completion poll.
    pub poll_delay: Duration,
    /// Re-arm one scheduler entry when a poll observes a pending run.
    pub reschedule_on_pending: bool,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, JobError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a lookup function (injectable for tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, JobError> {
        let poll_delay = match lookup("JOBFLOW_POLL_DELAY_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    JobError::Configuration(format!(
                        "JOBFLOW_POLL_DELAY_SECS must be an integer, got {raw:?}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_POLL_DELAY,
        };

        let reschedule_on_pending = match lookup("JOBFLOW_RESCHEDULE_ON_PENDING").as_deref() {
            Some("1") | Some("true") => true,
            _ => false,
        };

        Ok(Self {
            project: required_var(&lookup, "JOBFLOW_PROJECT")?,
            location: required_var(&lookup, "JOBFLOW_LOCATION")?,
            queue: required_var(&lookup, "JOBFLOW_QUEUE")?,
            poll_url: required_var(&lookup, "JOBFLOW_POLL_URL")?,
            appsheet_app_id: required_var(&lookup, "JOBFLOW_APPSHEET_APP_ID")?,
            poll_delay,
            reschedule_on_pending,
        })
    }

    /// Fully-qualified Cloud Tasks queue path.
    pub fn queue_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project, self.location, self.queue
        )
    }

}

fn required_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, JobError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(JobError::Configuration(format!(
            "missing required environment variable {key}"
        ))),
    }
}
