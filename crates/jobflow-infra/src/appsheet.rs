//! AppSheet adapter implementing the [`RecordStore`] port.
//!
//! Writes one completion row per successful run via the AppSheet table
//! records API. The `Edit` action upserts by the table's key column
//! (`job_id`), which is what makes repeated success polls idempotent.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use jobflow_core::port::RecordStore;
use jobflow_types::error::JobError;
use jobflow_types::job::JobCompletionRow;

const APPSHEET_BASE_URL: &str = "https://api.appsheet.com/api/v2";

/// Table holding one row per job.
const JOB_TABLE: &str = "job";

/// AppSheet REST client bound to one application.
pub struct AppSheetRecordStore {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    app_id: String,
}

impl AppSheetRecordStore {
    pub fn new(client: reqwest::Client, api_key: SecretString, app_id: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: APPSHEET_BASE_URL.to_string(),
            app_id: app_id.into(),
        }
    }

    /// Override the API base URL (useful for tests and proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn records_url(&self) -> String {
        format!(
            "{}/apps/{}/tables/{}/records",
            self.base_url, self.app_id, JOB_TABLE
        )
    }

    /// `Edit` action body carrying the single completion row.
    fn edit_body(row: &JobCompletionRow) -> Value {
        json!({
            "Action": "Edit",
            "Properties": { "Locale": "en-US" },
            "Rows": [{
                "job_id": row.job_id,
                "export_path": row.export_path,
                "message": row.message,
                "status": row.status,
            }]
        })
    }
}

impl RecordStore for AppSheetRecordStore {
    async fn record_success(&self, row: &JobCompletionRow) -> Result<(), JobError> {
        let response = self
            .client
            .post(self.records_url())
            .header("ApplicationAccessKey", self.api_key.expose_secret())
            .json(&Self::edit_body(row))
            .send()
            .await
            .map_err(|e| JobError::upstream("appsheet", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::upstream(
                "appsheet",
                format!("HTTP {status}: {body}"),
            ));
        }

        tracing::debug!(job_id = %row.job_id, "completion row upserted");
        Ok(())
    }
}
