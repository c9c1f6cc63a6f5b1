//! Run-task webhook receiver handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use rungate_core::service::RunTaskOutcome;
use rungate_types::run_task::{TaskResult, TaskResultDocument, SIGNATURE_HEADER};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST / - Receive an HCP Terraform run-task callback.
///
/// The body is taken as raw bytes so signature verification runs over the
/// exact text as received. The signature header lookup is case-insensitive
/// (axum `HeaderMap` semantics); a missing header fails verification.
pub async fn receive_run_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TaskResultDocument>, AppError> {
    let raw_body = std::str::from_utf8(&body)
        .map_err(|e| AppError::Internal(format!("request body is not valid UTF-8: {e}")))?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state.service.handle(raw_body, signature).await?;

    let result = match outcome {
        RunTaskOutcome::HandshakeAccepted => TaskResult::handshake_accepted(),
        RunTaskOutcome::ValidationCompleted(result) => result,
    };

    Ok(Json(result.into()))
}
