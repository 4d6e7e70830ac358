//! Run handles, run states, and poll status classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one execution instance of the external workflow.
///
/// Assigned by the transformation service when a run is submitted and never
/// changes afterwards. Jobflow treats it as a black box; it is only echoed
/// back to the service when querying run state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunHandle(String);

impl RunHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RunHandle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

/// Three-way classification of an external run.
///
/// The transformation service reports a richer state set (RUNNING,
/// CANCELLING, ...); Jobflow collapses it to the three states that matter
/// for completion reporting. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Pending,
    Succeeded,
    Failed,
}

impl RunState {
    /// Collapse a raw state string from the transformation service.
    ///
    /// Only an exact `SUCCEEDED` or `FAILED` is treated as terminal;
    /// everything else (RUNNING, CANCELLED, unknown future states) is
    /// still pending from the poller's point of view.
    pub fn from_invocation_state(raw: &str) -> Self {
        match raw {
            "SUCCEEDED" => RunState::Succeeded,
            "FAILED" => RunState::Failed,
            _ => RunState::Pending,
        }
    }

    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }
}

/// Poll outcome reported to the caller of the poll endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollStatus {
    /// Run succeeded and the record store was updated.
    Completed,
    /// Run failed; reported in the response only.
    Failed,
    /// Run has not reached a terminal state yet.
    Pending,
}
