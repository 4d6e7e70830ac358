//! Port for the delayed-task scheduler that re-invokes the poll endpoint.

use std::time::Duration;

use jobflow_types::error::JobError;
use jobflow_types::job::PollTask;

/// One-shot delayed callback delivery.
///
/// Each call enqueues exactly one entry that fires no earlier than `delay`
/// after creation, carrying `task` as an opaque payload to the poll
/// endpoint. At-most-once delivery of that single entry is the scheduler's
/// responsibility; the core never deduplicates.
pub trait PollScheduler: Send + Sync {
    /// Enqueue one delayed poll for `task`.
    fn schedule_poll(
        &self,
        task: &PollTask,
        delay: Duration,
    ) -> impl std::future::Future<Output = Result<(), JobError>> + Send;
}
