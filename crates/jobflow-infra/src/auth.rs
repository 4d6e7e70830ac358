//! Google Cloud access-token acquisition.
//!
//! Dataform and Cloud Tasks both authenticate with an OAuth2 bearer token.
//! In GCP runtimes the token comes from the instance metadata server; a
//! `JOBFLOW_ACCESS_TOKEN` environment variable overrides it for local runs
//! and tests.

use jobflow_types::error::JobError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Env var that short-circuits the metadata server.
pub const ACCESS_TOKEN_VAR: &str = "JOBFLOW_ACCESS_TOKEN";

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Source of bearer tokens for Google Cloud API calls.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> impl std::future::Future<Output = Result<SecretString, JobError>> + Send;
}

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}

/// Token source backed by the GCE metadata server, with an env override.
///
/// The override is resolved once at construction through an injectable
/// lookup, like [`crate::config::Config::from_lookup`], so tests never
/// mutate process-global environment variables.
pub struct MetadataTokenSource {
    client: reqwest::Client,
    token_url: String,
    override_token: Option<SecretString>,
}

impl MetadataTokenSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self::from_lookup(client, |key| std::env::var(key).ok())
    }

    /// Build with an injectable env lookup (tests use this).
    pub fn from_lookup(
        client: reqwest::Client,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let override_token = lookup(ACCESS_TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        Self {
            client,
            token_url: METADATA_TOKEN_URL.to_string(),
            override_token,
        }
    }

    /// Override the metadata endpoint (useful for tests and proxies).
    #[allow(dead_code)]
    pub fn with_token_url(mut self, token_url: String) -> Self {
        self.token_url = token_url;
        self
    }
}

impl TokenSource for MetadataTokenSource {
    async fn token(&self) -> Result<SecretString, JobError> {
        if let Some(token) = &self.override_token {
            return Ok(SecretString::from(token.expose_secret().to_string()));
        }

        let response = self
            .client
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| JobError::upstream("metadata-server", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::upstream(
                "metadata-server",
                format!("HTTP {status}: {body}"),
            ));
        }

        let token: MetadataTokenResponse = response
            .json()
            .await
            .map_err(|e| JobError::upstream("metadata-server", e))?;

        Ok(SecretString::from(token.access_token))
    }
}

/// Fixed-token source for tests.
pub struct StaticTokenSource(SecretString);

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }
}

impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<SecretString, JobError> {
        Ok(SecretString::from(self.0.expose_secret().to_string()))
    }
}
