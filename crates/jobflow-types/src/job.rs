//! Boundary schemas for starting and polling transformation jobs.
//!
//! Required fields are modelled as `Option` on the request structs so that
//! validation happens in jobflow-core (yielding `InvalidRequest` / HTTP 400)
//! instead of inside the JSON deserializer.

use serde::{Deserialize, Serialize};

use crate::run::{PollStatus, RunHandle};

/// Sentinel job identifier meaning "all jobs" when the caller omits one.
pub const ALL_JOBS_SENTINEL: &str = "ALL";

/// Fixed human-readable message written to the record store on success.
pub const SUCCESS_MESSAGE: &str = "Job completed successfully";

/// Fixed message returned by a successful "start job" response.
pub const START_MESSAGE: &str = "Job started successfully, completion poll scheduled";

// ---------------------------------------------------------------------------
// Start
// ---------------------------------------------------------------------------

/// Inbound "start job" request.
#[derive(Debug, Clone, Deserialize)]
pub struct StartJobRequest {
    /// Repository scope the job compiles and executes under.
    #[serde(default)]
    pub parent: Option<String>,
    /// Workspace within the repository to compile from.
    #[serde(default)]
    pub workspace: Option<String>,
    /// Record-store join key; defaults to [`ALL_JOBS_SENTINEL`] when absent.
    #[serde(default)]
    pub job_id: Option<String>,
}

/// Response to a successful "start job" request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartJobResponse {
    pub message: String,
    pub workflow_invocation_name: RunHandle,
}

/// A started run: the handle assigned by the transformation service plus the
/// export path generated for this invocation.
#[derive(Debug, Clone)]
pub struct StartedJob {
    pub run_handle: RunHandle,
    pub export_path: String,
}

/// Everything the transformation service needs to compile and kick one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSubmission {
    pub parent: String,
    pub workspace: String,
    /// Passed to the compiled workflow as the `job_id` compilation variable.
    pub job_id: String,
    /// Passed as the `export_path` compilation variable.
    pub export_path: String,
}

// ---------------------------------------------------------------------------
// Poll
// ---------------------------------------------------------------------------

/// Inbound "poll job" request, delivered by the delayed-task scheduler.
#[derive(Debug, Clone, Deserialize)]
pub struct PollJobRequest {
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub workflow_invocation_name: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub export_path: Option<String>,
}

/// Response to a poll attempt. Always HTTP 200 when the poll itself ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollJobResponse {
    pub status: PollStatus,
    pub workflow_invocation_name: RunHandle,
}

/// Payload of one scheduler entry: everything the poll endpoint needs to
/// re-identify the run. Field names are the wire contract between the
/// orchestrator (which enqueues it) and the poll endpoint (which receives it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollTask {
    pub parent: String,
    pub workflow_invocation_name: RunHandle,
    pub job_id: String,
    pub export_path: String,
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

/// Single-row upsert written to the record store when a run first reaches
/// `SUCCEEDED`. Keyed by `job_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCompletionRow {
    pub job_id: String,
    pub export_path: String,
    pub message: String,
    pub status: String,
}

impl JobCompletionRow {
    /// Build the success row for a completed run.
    pub fn success(job_id: impl Into<String>, export_path: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            export_path: export_path.into(),
            message: SUCCESS_MESSAGE.to_string(),
            status: "success".to_string(),
        }
    }
}
