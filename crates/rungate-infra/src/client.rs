//! Shared outbound HTTP client construction.

use std::time::Duration;

/// Content type used by the HCP Terraform JSON:API endpoints.
pub const JSONAPI_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Build the shared outbound client with a uniform request timeout.
///
/// The same timeout covers all three outbound calls (secret fetch, plan
/// fetch, result callback); expiry surfaces as an upstream failure and a
/// 500 response, never a retry.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to create reqwest client")
}
