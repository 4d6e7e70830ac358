use thiserror::Error;

/// Errors surfaced by job orchestration and polling.
///
/// The taxonomy is deliberately small: every failure is either the caller's
/// fault (`InvalidRequest`), a collaborator's fault
/// (`UpstreamDependencyFailure`), or a deployment fault (`Configuration`).
/// No variant is retried locally; the caller decides what to do next.
#[derive(Debug, Error)]
pub enum JobError {
    /// A required request field is missing or malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A call to the transformation service, the task scheduler, or the
    /// record store failed.
    #[error("upstream dependency failure ({dependency}): {message}")]
    UpstreamDependencyFailure {
        /// Which collaborator failed (e.g. "transform-runner", "scheduler").
        dependency: String,
        /// Human-readable description of what went wrong.
        message: String,
    },

    /// Required configuration is absent or unusable. Raised at startup,
    /// never per-request.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl JobError {
    /// Shorthand for an upstream failure attributed to `dependency`.
    pub fn upstream(dependency: &str, message: impl std::fmt::Display) -> Self {
        JobError::UpstreamDependencyFailure {
            dependency: dependency.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = JobError::InvalidRequest("missing required parameter: parent".to_string());
        assert_eq!(
            err.to_string(),
            "invalid request: missing required parameter: parent"
        );
    }

    #[test]
    fn test_upstream_display_names_dependency() {
        let err = JobError::upstream("scheduler", "queue not found");
        assert!(err.to_string().contains("scheduler"));
        assert!(err.to_string().contains("queue not found"));
    }

    #[test]
    fn test_configuration_display() {
        let err = JobError::Configuration("JOBFLOW_PROJECT is not set".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: JOBFLOW_PROJECT is not set"
        );
    }
}
