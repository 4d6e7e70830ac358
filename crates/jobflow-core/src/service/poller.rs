//! Poll state machine: observes one run and reports terminal states.

use std::time::Duration;

use jobflow_types::error::JobError;
use jobflow_types::job::{JobCompletionRow, PollJobRequest, PollTask};
use jobflow_types::run::{PollStatus, RunState};

use crate::port::{PollScheduler, RecordStore, TransformRunner};
use crate::service::{DEFAULT_POLL_DELAY, required};

/// Examines a run's state on each invocation and either reports completion,
/// reports failure, or leaves the run pending.
///
/// Invoked once per scheduler entry; the scheduler owns at-most-once
/// delivery, so no deduplication happens here. The record store is written
/// only on an observed `SUCCEEDED`, and failure is reported in the response
/// alone -- the asymmetry is deliberate.
pub struct JobPoller<R: TransformRunner, W: RecordStore, S: PollScheduler> {
    runner: R,
    records: W,
    scheduler: S,
    /// When set, a `PENDING` observation re-arms one scheduler entry with
    /// the same payload, turning the single-shot trigger into a
    /// recurring-until-terminal loop. Off by default.
    reschedule_on_pending: bool,
    poll_delay: Duration,
}

impl<R: TransformRunner, W: RecordStore, S: PollScheduler> JobPoller<R, W, S> {
    pub fn new(runner: R, records: W, scheduler: S) -> Self {
        Self {
            runner,
            records,
            scheduler,
            reschedule_on_pending: false,
            poll_delay: DEFAULT_POLL_DELAY,
        }
    }

    /// Enable re-arming the scheduler on `PENDING` observations.
    pub fn with_reschedule_on_pending(mut self, enabled: bool) -> Self {
        self.reschedule_on_pending = enabled;
        self
    }

    /// Override the re-poll delay (only relevant with rescheduling on).
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Run one poll step for the run identified by the request payload.
    pub async fn poll(&self, request: PollJobRequest) -> Result<PollStatus, JobError> {
        // Validate everything before touching the runner.
        let task = PollTask {
            parent: required(request.parent, "parent")?,
            workflow_invocation_name: required(
                request.workflow_invocation_name,
                "workflow_invocation_name",
            )?
            .into(),
            job_id: required(request.job_id, "job_id")?,
            export_path: required(request.export_path, "export_path")?,
        };

        let state = self.runner.state(&task.workflow_invocation_name).await?;
        tracing::info!(
            run_handle = %task.workflow_invocation_name,
            job_id = %task.job_id,
            ?state,
            "observed run state"
        );

        match state {
            RunState::Succeeded => {
                self.records
                    .record_success(&JobCompletionRow::success(
                        task.job_id.clone(),
                        task.export_path.clone(),
                    ))
                    .await?;
                tracing::info!(job_id = %task.job_id, export_path = %task.export_path, "completion recorded");
                Ok(PollStatus::Completed)
            }
            RunState::Failed => {
                tracing::warn!(run_handle = %task.workflow_invocation_name, "run failed");
                Ok(PollStatus::Failed)
            }
            RunState::Pending => {
                if self.reschedule_on_pending {
                    self.scheduler.schedule_poll(&task, self.poll_delay).await?;
                    tracing::info!(
                        run_handle = %task.workflow_invocation_name,
                        delay_secs = self.poll_delay.as_secs(),
                        "run still pending, poll re-armed"
                    );
                }
                Ok(PollStatus::Pending)
            }
        }
    }
}
