//! Job start and poll handlers.
//!
//! Thin translation layer: deserialize the body, call the service, shape
//! the response. All validation lives in jobflow-core so that a missing
//! field yields 400 rather than a deserializer rejection.

use axum::Json;
use axum::extract::State;

use jobflow_types::job::{
    PollJobRequest, PollJobResponse, START_MESSAGE, StartJobRequest, StartJobResponse,
};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/v1/jobs/start - Kick a transformation run and schedule its
/// completion poll.
pub async fn start_job(
    State(state): State<AppState>,
    Json(body): Json<StartJobRequest>,
) -> Result<Json<StartJobResponse>, AppError> {
    let started = state.orchestrator.start(body).await?;

    Ok(Json(StartJobResponse {
        message: START_MESSAGE.to_string(),
        workflow_invocation_name: started.run_handle,
    }))
}

/// POST /api/v1/jobs/poll - Check one run and record completion.
///
/// Invoked by the delayed-task queue, not by end users. Always 200 when the
/// poll itself ran; the three-way status is the designed outcome space.
pub async fn poll_job(
    State(state): State<AppState>,
    Json(body): Json<PollJobRequest>,
) -> Result<Json<PollJobResponse>, AppError> {
    // The handle is echoed back; grab it before the body moves.
    let handle = body.workflow_invocation_name.clone().unwrap_or_default();
    let status = state.poller.poll(body).await?;

    Ok(Json(PollJobResponse {
        status,
        workflow_invocation_name: handle.into(),
    }))
}
