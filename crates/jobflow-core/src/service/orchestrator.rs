//! Job orchestrator: starts a run and schedules its first completion poll.

use std::time::Duration;

use chrono::Utc;

use jobflow_types::error::JobError;
use jobflow_types::job::{
    ALL_JOBS_SENTINEL, PollTask, RunSubmission, StartJobRequest, StartedJob,
};

use crate::export::export_path_for;
use crate::port::{PollScheduler, TransformRunner};
use crate::service::{DEFAULT_POLL_DELAY, required};

/// Starts one transformation run and arms the delayed poll that will
/// observe its completion.
///
/// Stateless between calls: everything the later poll needs travels in the
/// scheduler entry's payload. Exactly one runner submission and one
/// scheduler entry per successful start; no record-store write happens here.
pub struct JobOrchestrator<R: TransformRunner, S: PollScheduler> {
    runner: R,
    scheduler: S,
    poll_delay: Duration,
}

impl<R: TransformRunner, S: PollScheduler> JobOrchestrator<R, S> {
    pub fn new(runner: R, scheduler: S) -> Self {
        Self {
            runner,
            scheduler,
            poll_delay: DEFAULT_POLL_DELAY,
        }
    }

    /// Override the poll delay (configuration surface; default 30 s).
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Start a run: validate, submit to the transformation service, then
    /// enqueue exactly one delayed poll.
    ///
    /// Failures propagate with no retry; the caller must re-invoke. A
    /// scheduler failure after a successful submission leaves the run
    /// executing unobserved -- cancellation is unsupported by design.
    pub async fn start(&self, request: StartJobRequest) -> Result<StartedJob, JobError> {
        let parent = required(request.parent, "parent")?;
        let workspace = required(request.workspace, "workspace")?;
        let job_id = match request.job_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => ALL_JOBS_SENTINEL.to_string(),
        };

        let export_path = export_path_for(&job_id, Utc::now());
        tracing::info!(%parent, %workspace, %job_id, %export_path, "starting transformation run");

        let run_handle = self
            .runner
            .submit(&RunSubmission {
                parent: parent.clone(),
                workspace,
                job_id: job_id.clone(),
                export_path: export_path.clone(),
            })
            .await?;
        tracing::info!(%run_handle, "run submitted");

        let task = PollTask {
            parent,
            workflow_invocation_name: run_handle.clone(),
            job_id,
            export_path: export_path.clone(),
        };
        self.scheduler.schedule_poll(&task, self.poll_delay).await?;
        tracing::info!(%run_handle, delay_secs = self.poll_delay.as_secs(), "completion poll scheduled");

        Ok(StartedJob {
            run_handle,
            export_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRunner, FakeScheduler};
    use jobflow_types::run::RunState;

    fn start_request(parent: Option<&str>, workspace: Option<&str>, job_id: Option<&str>) -> StartJobRequest {
        StartJobRequest {
            parent: parent.map(str::to_string),
            workspace: workspace.map(str::to_string),
            job_id: job_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_start_creates_one_scheduler_entry_with_matching_payload() {
        let orchestrator = JobOrchestrator::new(
            FakeRunner::succeeding("R1", RunState::Pending),
            FakeScheduler::default(),
        );

        let started = orchestrator
            .start(start_request(Some("projects/p"), Some("ws"), Some("J1")))
            .await
            .unwrap();

        let entries = orchestrator.scheduler.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        let (task, delay) = &entries[0];
        assert!(*delay >= Duration::from_secs(30));
        assert_eq!(task.parent, "projects/p");
        assert_eq!(task.workflow_invocation_name, started.run_handle);
        assert_eq!(task.job_id, "J1");
        assert_eq!(task.export_path, started.export_path);
    }

    #[tokio::test]
    async fn test_start_passes_job_id_and_export_path_as_compilation_vars() {
        let orchestrator = JobOrchestrator::new(
            FakeRunner::succeeding("R1", RunState::Pending),
            FakeScheduler::default(),
        );

        let started = orchestrator
            .start(start_request(Some("projects/p"), Some("ws"), Some("J1")))
            .await
            .unwrap();

        let submissions = orchestrator.runner.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].workspace, "ws");
        assert_eq!(submissions[0].job_id, "J1");
        assert_eq!(submissions[0].export_path, started.export_path);
        assert!(started.export_path.starts_with("exports/J1_"));
    }

    #[tokio::test]
    async fn test_start_without_job_id_uses_all_sentinel() {
        let orchestrator = JobOrchestrator::new(
            FakeRunner::succeeding("R1", RunState::Pending),
            FakeScheduler::default(),
        );

        let started = orchestrator
            .start(start_request(Some("P"), Some("W"), None))
            .await
            .unwrap();

        assert!(!started.run_handle.as_str().is_empty());
        let entries = orchestrator.scheduler.entries.lock().unwrap();
        assert_eq!(entries[0].0.job_id, "ALL");
        assert!(started.export_path.starts_with("exports/ALL_"));
    }

    #[tokio::test]
    async fn test_start_missing_parent_is_invalid_and_has_no_side_effects() {
        let orchestrator = JobOrchestrator::new(
            FakeRunner::succeeding("R1", RunState::Pending),
            FakeScheduler::default(),
        );

        let err = orchestrator
            .start(start_request(None, Some("ws"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::InvalidRequest(_)));
        assert!(orchestrator.runner.submissions.lock().unwrap().is_empty());
        assert!(orchestrator.scheduler.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_missing_workspace_is_invalid_and_has_no_side_effects() {
        let orchestrator = JobOrchestrator::new(
            FakeRunner::succeeding("R1", RunState::Pending),
            FakeScheduler::default(),
        );

        let err = orchestrator
            .start(start_request(Some("projects/p"), None, Some("J1")))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::InvalidRequest(_)));
        assert!(orchestrator.runner.submissions.lock().unwrap().is_empty());
        assert!(orchestrator.scheduler.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_runner_failure_surfaces_upstream_and_schedules_nothing() {
        let orchestrator =
            JobOrchestrator::new(FakeRunner::failing(), FakeScheduler::default());

        let err = orchestrator
            .start(start_request(Some("projects/p"), Some("ws"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::UpstreamDependencyFailure { .. }));
        assert!(orchestrator.scheduler.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scheduler_failure_surfaces_upstream() {
        let orchestrator = JobOrchestrator::new(
            FakeRunner::succeeding("R1", RunState::Pending),
            FakeScheduler {
                fail: true,
                ..Default::default()
            },
        );

        let err = orchestrator
            .start(start_request(Some("projects/p"), Some("ws"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::UpstreamDependencyFailure { .. }));
    }
}
