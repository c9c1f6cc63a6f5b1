//! Run-task request orchestration.
//!
//! [`RunTaskService`] drives one inbound callback end to end: secret
//! resolution, signature verification, the configuration handshake
//! short-circuit, plan fetch, policy evaluation, and the result callback.
//! All outbound calls are sequential and awaited in order; there is no
//! retry and no shared state between invocations.

use secrecy::ExposeSecret;

use rungate_types::error::RunTaskError;
use rungate_types::run_task::{RunTaskPayload, TaskResult};

use crate::policy::ValidationPolicy;
use crate::ports::{PlanFetcher, ResultNotifier, SecretResolver};
use crate::signature;

/// Terminal outcome of a successfully handled request.
///
/// Authentication failure and internal failures are not outcomes; they
/// surface as [`RunTaskError`] and are mapped to 401/500 at the HTTP
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTaskOutcome {
    /// Configuration-time probe accepted; no plan fetch or callback made.
    HandshakeAccepted,
    /// Plan fetched, policy evaluated, callback notified.
    ValidationCompleted(TaskResult),
}

/// Orchestrates run-task handling, generic over its ports so tests can
/// substitute doubles and deployments can swap secret backends.
///
/// The secret parameter name is an explicit constructor argument rather
/// than a hidden process lookup.
pub struct RunTaskService<S, P, N, V> {
    secret_param: String,
    secrets: S,
    plans: P,
    notifier: N,
    policy: V,
}

impl<S, P, N, V> RunTaskService<S, P, N, V>
where
    S: SecretResolver,
    P: PlanFetcher,
    N: ResultNotifier,
    V: ValidationPolicy,
{
    pub fn new(secret_param: impl Into<String>, secrets: S, plans: P, notifier: N, policy: V) -> Self {
        Self {
            secret_param: secret_param.into(),
            secrets,
            plans,
            notifier,
            policy,
        }
    }

    /// Handle one inbound run-task callback.
    ///
    /// `raw_body` must be the body bytes exactly as received -- the
    /// signature covers the raw text, not a re-serialized form.
    /// `signature` is the `x-tfc-task-signature` header value; a missing
    /// header is passed as `None` and treated as the empty signature,
    /// which fails verification.
    pub async fn handle(
        &self,
        raw_body: &str,
        signature_header: Option<&str>,
    ) -> Result<RunTaskOutcome, RunTaskError> {
        let hmac_key = self.secrets.resolve(&self.secret_param).await?;

        let payload: RunTaskPayload = serde_json::from_str(raw_body)
            .map_err(|e| RunTaskError::MalformedPayload(e.to_string()))?;

        let supplied = signature_header.unwrap_or("");
        if !signature::verify(
            hmac_key.expose_secret().as_bytes(),
            raw_body.as_bytes(),
            supplied,
        ) {
            tracing::warn!("run-task signature verification failed");
            return Err(RunTaskError::InvalidSignature);
        }

        // Run-task configuration probe: signature checked, nothing else runs
        if payload.is_handshake() {
            tracing::info!("run-task configuration handshake accepted");
            return Ok(RunTaskOutcome::HandshakeAccepted);
        }

        let plan = self
            .plans
            .fetch_plan(payload.plan_json_api_url()?, payload.access_token()?)
            .await?;

        let result = self.policy.evaluate(&plan)?;
        tracing::info!(status = %result.status, "plan validation completed");

        self.notifier
            .notify(
                payload.task_result_callback_url()?,
                payload.access_token()?,
                &result,
            )
            .await?;

        Ok(RunTaskOutcome::ValidationCompleted(result))
    }
}
