//! Wire-format types for the HCP Terraform Run Task protocol.
//!
//! The inbound callback payload carries per-request credentials and URLs:
//! the gateway never talks to a statically configured Terraform endpoint,
//! it only follows the URLs supplied in the signature-verified payload.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::RunTaskError;

/// Enforcement-level sentinel sent during run-task configuration.
///
/// When HCP Terraform registers a run task it sends a probe request with
/// `task_result_enforcement_level = "test"`; the gateway answers with a
/// success envelope and performs no plan fetch or callback.
pub const HANDSHAKE_ENFORCEMENT_LEVEL: &str = "test";

/// Header carrying the hex-encoded HMAC-SHA512 request signature.
pub const SIGNATURE_HEADER: &str = "x-tfc-task-signature";

/// Inbound run-task callback payload (fields consumed).
///
/// All fields are optional at parse time: a handshake request carries no
/// plan URL, and the original protocol tolerates absent fields until the
/// moment they are needed. The accessor methods convert absence into
/// [`RunTaskError::MissingField`] at the point of use.
#[derive(Debug, Deserialize)]
pub struct RunTaskPayload {
    pub task_result_enforcement_level: Option<String>,
    pub plan_json_api_url: Option<String>,
    /// Per-request bearer credential; never logged.
    pub access_token: Option<SecretString>,
    pub task_result_callback_url: Option<String>,
}

impl RunTaskPayload {
    /// True for the configuration-time probe request.
    pub fn is_handshake(&self) -> bool {
        self.task_result_enforcement_level.as_deref() == Some(HANDSHAKE_ENFORCEMENT_LEVEL)
    }

    pub fn plan_json_api_url(&self) -> Result<&str, RunTaskError> {
        self.plan_json_api_url
            .as_deref()
            .ok_or(RunTaskError::MissingField("plan_json_api_url"))
    }

    pub fn access_token(&self) -> Result<&SecretString, RunTaskError> {
        self.access_token
            .as_ref()
            .ok_or(RunTaskError::MissingField("access_token"))
    }

    pub fn task_result_callback_url(&self) -> Result<&str, RunTaskError> {
        self.task_result_callback_url
            .as_deref()
            .ok_or(RunTaskError::MissingField("task_result_callback_url"))
    }
}

/// Terminal status of a run-task evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Passed,
    Failed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Passed => write!(f, "passed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of a validation policy: status plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub status: TaskStatus,
    pub message: String,
}

impl TaskResult {
    pub fn new(status: TaskStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Result envelope for a successful configuration handshake.
    pub fn handshake_accepted() -> Self {
        Self::new(TaskStatus::Passed, "Configuration successful")
    }
}

/// JSON:API-flavored envelope sent to the callback URL and echoed in the
/// 200 response body:
/// `{ "data": { "type": "task-results", "attributes": { "status", "message" } } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResultDocument {
    pub data: TaskResultData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResultData {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: TaskResult,
}

impl From<TaskResult> for TaskResultDocument {
    fn from(attributes: TaskResult) -> Self {
        Self {
            data: TaskResultData {
                kind: "task-results".to_string(),
                attributes,
            },
        }
    }
}
