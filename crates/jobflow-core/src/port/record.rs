//! Port for the system-of-record that tracks job completion.

use jobflow_types::error::JobError;
use jobflow_types::job::JobCompletionRow;

/// External record store keyed by job identifier.
///
/// A single idempotent upsert: writing the same row twice leaves one
/// logical record, so the poller needs no locking discipline beyond
/// upsert-by-key.
pub trait RecordStore: Send + Sync {
    /// Upsert the success row for a completed run.
    fn record_success(
        &self,
        row: &JobCompletionRow,
    ) -> impl std::future::Future<Output = Result<(), JobError>> + Send;
}
