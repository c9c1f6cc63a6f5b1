//! Outbound-call ports implemented by rungate-infra.
//!
//! Native async fn in traits (RPITIT, Rust 2024 edition); no boxing
//! needed because the service is generic over its ports rather than
//! trait-object based.

use secrecy::SecretString;

use rungate_types::error::UpstreamError;
use rungate_types::run_task::TaskResult;

/// Resolves a named secret parameter to its decrypted value.
///
/// The production implementation talks to the Parameter Store sidecar;
/// an env-var implementation exists for local development.
pub trait SecretResolver: Send + Sync {
    fn resolve(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<SecretString, UpstreamError>> + Send;
}

/// Fetches the plan JSON document from the caller-supplied URL.
pub trait PlanFetcher: Send + Sync {
    fn fetch_plan(
        &self,
        url: &str,
        token: &SecretString,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, UpstreamError>> + Send;
}

/// Reports the validation outcome to the caller-supplied callback URL.
pub trait ResultNotifier: Send + Sync {
    fn notify(
        &self,
        url: &str,
        token: &SecretString,
        result: &TaskResult,
    ) -> impl std::future::Future<Output = Result<(), UpstreamError>> + Send;
}
