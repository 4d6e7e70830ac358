//! Dataform adapter implementing the [`TransformRunner`] port.
//!
//! Submitting a run is two calls against the Dataform v1beta1 REST API:
//! compile the workspace with per-run variables, then invoke the compiled
//! workflow. Querying state is a single GET on the workflow invocation
//! resource; its raw `state` string is collapsed by
//! [`RunState::from_invocation_state`].

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};

use jobflow_core::port::TransformRunner;
use jobflow_types::error::JobError;
use jobflow_types::job::RunSubmission;
use jobflow_types::run::{RunHandle, RunState};

use crate::auth::TokenSource;

const DATAFORM_BASE_URL: &str = "https://dataform.googleapis.com/v1beta1";

/// Dataform REST client.
pub struct DataformRunner<T: TokenSource> {
    client: reqwest::Client,
    tokens: T,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct InvocationStateResponse {
    #[serde(default)]
    state: String,
}

impl<T: TokenSource> DataformRunner<T> {
    pub fn new(client: reqwest::Client, tokens: T) -> Self {
        Self {
            client,
            tokens,
            base_url: DATAFORM_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (useful for tests and proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Body of the compilation request: pin the workspace and hand the
    /// workflow its per-run variables.
    fn compilation_body(submission: &RunSubmission) -> Value {
        json!({
            "workspace": format!("{}/workspaces/{}", submission.parent, submission.workspace),
            "codeCompilationConfig": {
                "vars": {
                    "job_id": submission.job_id,
                    "export_path": submission.export_path,
                }
            }
        })
    }

    fn invocation_body(compilation_result: &str) -> Value {
        json!({ "compilationResult": compilation_result })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<NamedResource, JobError> {
        let token = self.tokens.token().await?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| JobError::upstream("dataform", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::upstream(
                "dataform",
                format!("HTTP {status}: {body}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| JobError::upstream("dataform", e))
    }
}

impl<T: TokenSource> TransformRunner for DataformRunner<T> {
    async fn submit(&self, submission: &RunSubmission) -> Result<RunHandle, JobError> {
        let compilation_url = format!("{}/{}/compilationResults", self.base_url, submission.parent);
        let compilation = self
            .post_json(&compilation_url, &Self::compilation_body(submission))
            .await?;
        tracing::debug!(compilation_result = %compilation.name, "workspace compiled");

        let invocation_url = format!("{}/{}/workflowInvocations", self.base_url, submission.parent);
        let invocation = self
            .post_json(&invocation_url, &Self::invocation_body(&compilation.name))
            .await?;

        Ok(RunHandle::new(invocation.name))
    }

    async fn state(&self, handle: &RunHandle) -> Result<RunState, JobError> {
        let token = self.tokens.token().await?;
        let url = format!("{}/{}", self.base_url, handle.as_str());
        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| JobError::upstream("dataform", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::upstream(
                "dataform",
                format!("HTTP {status}: {body}"),
            ));
        }

        let invocation: InvocationStateResponse = response
            .json()
            .await
            .map_err(|e| JobError::upstream("dataform", e))?;

        Ok(RunState::from_invocation_state(&invocation.state))
    }
}
