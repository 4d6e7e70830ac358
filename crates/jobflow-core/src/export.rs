//! Export path generation.

use chrono::{DateTime, Utc};

/// Derive the export destination for one run.
///
/// The path concatenates the job identifier with the invocation instant at
/// millisecond precision (`exports/{job_id}_{YYYYMMDDHHMMSSmmm}`), so two
/// runs of the same job started at different instants never collide --
/// including under the `"ALL"` sentinel.
pub fn export_path_for(job_id: &str, at: DateTime<Utc>) -> String {
    format!("exports/{job_id}_{}", at.format("%Y%m%d%H%M%S%3f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_path_format() {
        let at = Utc.with_ymd_and_hms(2024, 9, 22, 12, 34, 56).unwrap()
            + chrono::Duration::milliseconds(789);
        assert_eq!(export_path_for("job123", at), "exports/job123_20240922123456789");
    }

    #[test]
    fn test_export_path_pads_milliseconds() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(7);
        assert_eq!(export_path_for("ALL", at), "exports/ALL_20240101000000007");
    }

    #[test]
    fn test_export_path_unique_across_instants() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = export_path_for("J1", base);
        let b = export_path_for("J1", base + chrono::Duration::milliseconds(1));
        assert_ne!(a, b, "paths one millisecond apart must differ");
    }
}
