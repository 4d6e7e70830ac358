//! Port for the external transformation service that executes runs.

use jobflow_types::error::JobError;
use jobflow_types::job::RunSubmission;
use jobflow_types::run::{RunHandle, RunState};

/// The managed transformation service that compiles and executes a workflow.
///
/// `submit` covers the whole kickoff (compile the workspace with the run's
/// named variables, then create the workflow invocation) and returns the
/// opaque handle identifying that invocation. `state` classifies a running
/// invocation into the three states the poller cares about.
pub trait TransformRunner: Send + Sync {
    /// Compile and start one run. Returns the invocation handle.
    fn submit(
        &self,
        submission: &RunSubmission,
    ) -> impl std::future::Future<Output = Result<RunHandle, JobError>> + Send;

    /// Query the current classification of a run.
    fn state(
        &self,
        handle: &RunHandle,
    ) -> impl std::future::Future<Output = Result<RunState, JobError>> + Send;
}
