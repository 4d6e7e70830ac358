//! In-memory fakes for the capability ports, shared by service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use jobflow_types::error::JobError;
use jobflow_types::job::{JobCompletionRow, PollTask, RunSubmission};
use jobflow_types::run::{RunHandle, RunState};

use crate::port::{PollScheduler, RecordStore, TransformRunner};

/// Fake transformation service: records submissions, serves a fixed state.
pub struct FakeRunner {
    pub submissions: Mutex<Vec<RunSubmission>>,
    pub state_queries: Mutex<Vec<RunHandle>>,
    pub handle: RunHandle,
    pub run_state: Mutex<RunState>,
    pub fail_submit: bool,
    pub fail_state: bool,
}

impl FakeRunner {
    pub fn succeeding(handle: &str, state: RunState) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            state_queries: Mutex::new(Vec::new()),
            handle: RunHandle::new(handle),
            run_state: Mutex::new(state),
            fail_submit: false,
            fail_state: false,
        }
    }

    pub fn failing() -> Self {
        let mut runner = Self::succeeding("unused", RunState::Pending);
        runner.fail_submit = true;
        runner.fail_state = true;
        runner
    }
}

impl TransformRunner for FakeRunner {
    async fn submit(&self, submission: &RunSubmission) -> Result<RunHandle, JobError> {
        if self.fail_submit {
            return Err(JobError::upstream("transform-runner", "submit refused"));
        }
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(self.handle.clone())
    }

    async fn state(&self, handle: &RunHandle) -> Result<RunState, JobError> {
        if self.fail_state {
            return Err(JobError::upstream("transform-runner", "state query refused"));
        }
        self.state_queries.lock().unwrap().push(handle.clone());
        Ok(*self.run_state.lock().unwrap())
    }
}

/// Fake scheduler: records every enqueued entry.
#[derive(Default)]
pub struct FakeScheduler {
    pub entries: Mutex<Vec<(PollTask, Duration)>>,
    pub fail: bool,
}

impl PollScheduler for FakeScheduler {
    async fn schedule_poll(&self, task: &PollTask, delay: Duration) -> Result<(), JobError> {
        if self.fail {
            return Err(JobError::upstream("scheduler", "enqueue refused"));
        }
        self.entries.lock().unwrap().push((task.clone(), delay));
        Ok(())
    }
}

/// Fake record store: upsert-by-key semantics over a HashMap, plus a write
/// counter so tests can distinguish "one row" from "one write".
#[derive(Default)]
pub struct FakeRecordStore {
    pub rows: Mutex<HashMap<String, JobCompletionRow>>,
    pub writes: Mutex<u32>,
}

impl RecordStore for FakeRecordStore {
    async fn record_success(&self, row: &JobCompletionRow) -> Result<(), JobError> {
        *self.writes.lock().unwrap() += 1;
        self.rows
            .lock()
            .unwrap()
            .insert(row.job_id.clone(), row.clone());
        Ok(())
    }
}
