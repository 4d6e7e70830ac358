//! Cloud Tasks adapter implementing the [`PollScheduler`] port.
//!
//! Each scheduled poll becomes one Cloud Tasks HTTP task: a POST against the
//! poll endpoint, fired at `now + delay`, carrying the base64-encoded
//! [`PollTask`] JSON as its body. The queue owns delivery; Jobflow never
//! tracks the task after creation.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use jobflow_core::port::PollScheduler;
use jobflow_types::error::JobError;
use jobflow_types::job::PollTask;

use crate::auth::TokenSource;

const CLOUD_TASKS_BASE_URL: &str = "https://cloudtasks.googleapis.com/v2";

/// Cloud Tasks REST client bound to one queue and one poll endpoint.
pub struct CloudTasksScheduler<T: TokenSource> {
    client: reqwest::Client,
    tokens: T,
    base_url: String,
    queue_path: String,
    poll_url: String,
}

impl<T: TokenSource> CloudTasksScheduler<T> {
    pub fn new(
        client: reqwest::Client,
        tokens: T,
        queue_path: impl Into<String>,
        poll_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tokens,
            base_url: CLOUD_TASKS_BASE_URL.to_string(),
            queue_path: queue_path.into(),
            poll_url: poll_url.into(),
        }
    }

    /// Override the API base URL (useful for tests and proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the task creation body for one delayed poll.
    fn task_body(
        poll_url: &str,
        task: &PollTask,
        schedule_time: DateTime<Utc>,
    ) -> Result<Value, JobError> {
        let payload =
            serde_json::to_vec(task).map_err(|e| JobError::upstream("cloud-tasks", e))?;

        Ok(json!({
            "task": {
                "scheduleTime": schedule_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                "httpRequest": {
                    "httpMethod": "POST",
                    "url": poll_url,
                    "headers": { "Content-Type": "application/json" },
                    "body": BASE64.encode(payload),
                }
            }
        }))
    }
}

impl<T: TokenSource> PollScheduler for CloudTasksScheduler<T> {
    async fn schedule_poll(&self, task: &PollTask, delay: Duration) -> Result<(), JobError> {
        let schedule_time = Utc::now()
            + chrono::Duration::from_std(delay)
                .map_err(|e| JobError::upstream("cloud-tasks", e))?;
        let body = Self::task_body(&self.poll_url, task, schedule_time)?;

        let token = self.tokens.token().await?;
        let url = format!("{}/{}/tasks", self.base_url, self.queue_path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| JobError::upstream("cloud-tasks", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::upstream(
                "cloud-tasks",
                format!("HTTP {status}: {body}"),
            ));
        }

        tracing::debug!(queue = %self.queue_path, run_handle = %task.workflow_invocation_name, "poll task enqueued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jobflow_types::run::RunHandle;

    fn poll_task() -> PollTask {
        PollTask {
            parent: "projects/p/locations/l/repositories/r".to_string(),
            workflow_invocation_name: RunHandle::new("projects/p/workflowInvocations/abc"),
            job_id: "J1".to_string(),
            export_path: "exports/J1_20240101000000000".to_string(),
        }
    }

    #[test]
    fn test_task_body_schedule_time_is_rfc3339_utc() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 30).unwrap();
        let body =
            CloudTasksScheduler::<crate::auth::StaticTokenSource>::task_body(
                "https://example.test/poll",
                &poll_task(),
                at,
            )
            .unwrap();
        assert_eq!(body["task"]["scheduleTime"], "2024-01-01T12:00:30Z");
    }

    #[test]
    fn test_task_body_targets_poll_url_with_json_post() {
        let body =
            CloudTasksScheduler::<crate::auth::StaticTokenSource>::task_body(
                "https://example.test/poll",
                &poll_task(),
                Utc::now(),
            )
            .unwrap();
        let http = &body["task"]["httpRequest"];
        assert_eq!(http["httpMethod"], "POST");
        assert_eq!(http["url"], "https://example.test/poll");
        assert_eq!(http["headers"]["Content-Type"], "application/json");
    }

    #[test]
    fn test_task_body_payload_decodes_to_poll_task() {
        let task = poll_task();
        let body =
            CloudTasksScheduler::<crate::auth::StaticTokenSource>::task_body(
                "https://example.test/poll",
                &task,
                Utc::now(),
            )
            .unwrap();

        let encoded = body["task"]["httpRequest"]["body"].as_str().unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        let parsed: PollTask = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(parsed, task);
    }
}
