//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Every failure body is `{"error": "..."}`. Validation failures map to 400;
//! upstream and configuration failures map to 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use jobflow_types::error::JobError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub struct AppError(pub JobError);

impl From<JobError> for AppError {
    fn from(e: JobError) -> Self {
        AppError(e)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            JobError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            JobError::UpstreamDependencyFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            JobError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_maps_to_400() {
        let err = AppError(JobError::InvalidRequest(
            "missing required parameter: parent".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_failure_maps_to_500() {
        let err = AppError(JobError::upstream("dataform", "HTTP 503"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_configuration_error_maps_to_500() {
        let err = AppError(JobError::Configuration(
            "missing required environment variable JOBFLOW_PROJECT".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
