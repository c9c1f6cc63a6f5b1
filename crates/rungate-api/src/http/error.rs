//! Application error type mapping to HTTP status codes.
//!
//! Signature failure is the only externally distinguishable condition
//! (401). Every other failure -- malformed input, secret fetch, plan
//! fetch, callback delivery -- answers 500 with an
//! `{"message": "Internal error: <description>"}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use rungate_types::error::RunTaskError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Signature verification failed.
    Unauthorized,
    /// Any non-auth failure, folded into a single 500 class.
    Internal(String),
}

impl From<RunTaskError> for AppError {
    fn from(e: RunTaskError) -> Self {
        match e {
            RunTaskError::InvalidSignature => AppError::Unauthorized,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Failures are logged before the response is built; tracing is
        // infallible so this can never itself fail the request.
        let (status, body) = match self {
            AppError::Unauthorized => {
                tracing::warn!("answering 401: invalid signature");
                (
                    StatusCode::UNAUTHORIZED,
                    json!({"message": "Invalid signature"}),
                )
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "answering 500");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"message": format!("Internal error: {message}")}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_signature_maps_to_unauthorized() {
        let err: AppError = RunTaskError::InvalidSignature.into();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let err: AppError = RunTaskError::MissingTimestamp.into();
        let AppError::Internal(message) = err else {
            panic!("expected internal error");
        };
        assert!(message.contains("timestamp"));
    }
}
