use thiserror::Error;

/// Errors from outbound HTTP calls (sidecar secret fetch, plan fetch,
/// result callback). Any of these aborts the request with a 500; there
/// are no retries.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },
}

impl UpstreamError {
    /// Short label of the endpoint that failed, used in log fields.
    pub fn endpoint(&self) -> &str {
        match self {
            UpstreamError::Transport { endpoint, .. } => endpoint,
            UpstreamError::Status { endpoint, .. } => endpoint,
            UpstreamError::MalformedResponse { endpoint, .. } => endpoint,
        }
    }
}

/// Errors produced while handling a run-task request.
///
/// `InvalidSignature` is the only variant that maps to a 401; everything
/// else surfaces as a 500 with an "Internal error: ..." body. Malformed
/// input is deliberately folded into the 500 class rather than a 400 --
/// signature failure is the only externally distinguishable condition.
#[derive(Debug, Error)]
pub enum RunTaskError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed request payload: {0}")]
    MalformedPayload(String),

    #[error("request payload missing field '{0}'")]
    MissingField(&'static str),

    #[error("plan document missing 'timestamp' field")]
    MissingTimestamp,

    #[error("plan timestamp '{0}' is not a valid ISO-8601 datetime")]
    InvalidTimestamp(String),

    #[error("upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = UpstreamError::Status {
            endpoint: "plan fetch".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "plan fetch returned HTTP 503");
        assert_eq!(err.endpoint(), "plan fetch");
    }

    #[test]
    fn test_run_task_error_display() {
        let err = RunTaskError::InvalidTimestamp("not-a-date".to_string());
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_upstream_error_converts() {
        let upstream = UpstreamError::Transport {
            endpoint: "result callback".to_string(),
            message: "connection refused".to_string(),
        };
        let err: RunTaskError = upstream.into();
        assert!(matches!(err, RunTaskError::Upstream(_)));
    }
}
