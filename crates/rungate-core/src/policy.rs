//! Validation policy seam.
//!
//! The policy is the single pluggable extension point of the gateway:
//! orchestration, authentication, and callback plumbing stay untouched
//! when the stock rule is replaced with real plan-diff logic.

use chrono::{DateTime, NaiveDateTime, Timelike};

use rungate_types::error::RunTaskError;
use rungate_types::run_task::{TaskResult, TaskStatus};

/// Decides whether a fetched plan document passes validation.
///
/// Implementations must be pure with respect to the plan document: the
/// same document always yields the same result.
pub trait ValidationPolicy: Send + Sync {
    fn evaluate(&self, plan: &serde_json::Value) -> Result<TaskResult, RunTaskError>;
}

/// Stock placeholder policy: the plan passes iff the minute component of
/// its `timestamp` field is even.
///
/// This rule carries no real meaning; it exists so the end-to-end wiring
/// (signature, fetch, callback) can be exercised with both outcomes.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinuteParityPolicy;

impl MinuteParityPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ValidationPolicy for MinuteParityPolicy {
    fn evaluate(&self, plan: &serde_json::Value) -> Result<TaskResult, RunTaskError> {
        let raw = plan
            .get("timestamp")
            .and_then(|v| v.as_str())
            .ok_or(RunTaskError::MissingTimestamp)?;

        let timestamp = parse_iso8601(raw)?;

        let result = if timestamp.minute() % 2 == 0 {
            TaskResult::new(TaskStatus::Passed, "Validation passed")
        } else {
            TaskResult::new(TaskStatus::Failed, "Validation failed")
        };

        tracing::debug!(
            timestamp = raw,
            minute = timestamp.minute(),
            status = %result.status,
            "minute-parity policy evaluated"
        );
        Ok(result)
    }
}

/// Parse an ISO-8601 datetime, with or without a UTC offset.
///
/// Plan exports carry an offset (`2024-01-01T10:14:00+00:00`), but naive
/// datetimes are accepted too. The offset is not applied: the rule reads
/// the minute as written in the timestamp, so `10:14:00+05:45` evaluates
/// minute 14, not the UTC-shifted 29.
fn parse_iso8601(raw: &str) -> Result<NaiveDateTime, RunTaskError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    raw.parse::<NaiveDateTime>()
        .map_err(|_| RunTaskError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_even_minute_passes() {
        let plan = json!({"timestamp": "2024-01-01T10:14:00+00:00"});
        let result = MinuteParityPolicy::new().evaluate(&plan).unwrap();
        assert_eq!(result.status, TaskStatus::Passed);
        assert_eq!(result.message, "Validation passed");
    }

    #[test]
    fn test_odd_minute_fails() {
        let plan = json!({"timestamp": "2024-01-01T10:15:00+00:00"});
        let result = MinuteParityPolicy::new().evaluate(&plan).unwrap();
        assert_eq!(result.status, TaskStatus::Failed);
        assert_eq!(result.message, "Validation failed");
    }

    #[test]
    fn test_minute_zero_passes() {
        let plan = json!({"timestamp": "2024-06-30T23:00:59Z"});
        let result = MinuteParityPolicy::new().evaluate(&plan).unwrap();
        assert_eq!(result.status, TaskStatus::Passed);
    }

    #[test]
    fn test_parity_reads_written_minute_not_utc_shifted() {
        // +05:45 (Nepal) shifts the UTC minute by 45; the rule must read
        // the minute as written, so 10:14 passes and 10:15 fails
        // regardless of offset.
        let plan = json!({"timestamp": "2024-01-01T10:14:00+05:45"});
        let result = MinuteParityPolicy::new().evaluate(&plan).unwrap();
        assert_eq!(result.status, TaskStatus::Passed);

        let plan = json!({"timestamp": "2024-01-01T10:15:00+05:45"});
        let result = MinuteParityPolicy::new().evaluate(&plan).unwrap();
        assert_eq!(result.status, TaskStatus::Failed);
    }

    #[test]
    fn test_naive_timestamp_accepted() {
        let plan = json!({"timestamp": "2024-01-01T10:15:00"});
        let result = MinuteParityPolicy::new().evaluate(&plan).unwrap();
        assert_eq!(result.status, TaskStatus::Failed);
    }

    #[test]
    fn test_missing_timestamp_errors() {
        let plan = json!({"resource_changes": []});
        let err = MinuteParityPolicy::new().evaluate(&plan).unwrap_err();
        assert!(matches!(err, RunTaskError::MissingTimestamp));
    }

    #[test]
    fn test_non_string_timestamp_errors() {
        let plan = json!({"timestamp": 1704103200});
        let err = MinuteParityPolicy::new().evaluate(&plan).unwrap_err();
        assert!(matches!(err, RunTaskError::MissingTimestamp));
    }

    #[test]
    fn test_unparsable_timestamp_errors() {
        let plan = json!({"timestamp": "next tuesday"});
        let err = MinuteParityPolicy::new().evaluate(&plan).unwrap_err();
        assert!(matches!(err, RunTaskError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let plan = json!({"timestamp": "2024-01-01T10:14:00+00:00"});
        let policy = MinuteParityPolicy::new();
        let first = policy.evaluate(&plan).unwrap();
        let second = policy.evaluate(&plan).unwrap();
        assert_eq!(first, second);
    }
}
