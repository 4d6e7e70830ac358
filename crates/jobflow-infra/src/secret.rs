//! Environment variable secret loading.
//!
//! The AppSheet API key is loaded once at startup from `APPSHEET_API_KEY`
//! and wrapped in [`secrecy::SecretString`] so it never appears in `Debug`
//! output or tracing logs.

use jobflow_types::error::JobError;
use secrecy::SecretString;

/// Environment variable holding the AppSheet application access key.
pub const APPSHEET_API_KEY_VAR: &str = "APPSHEET_API_KEY";

/// Load the AppSheet API key from the environment.
pub fn appsheet_api_key() -> Result<SecretString, JobError> {
    secret_from_lookup(APPSHEET_API_KEY_VAR, |key| std::env::var(key).ok())
}

/// Load a secret through a lookup function (injectable for tests).
pub fn secret_from_lookup(
    key: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, JobError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(JobError::Configuration(format!(
            "missing required secret {key}"
        ))),
    }
}
