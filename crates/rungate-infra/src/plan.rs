//! Plan document fetcher.

use secrecy::{ExposeSecret, SecretString};

use rungate_core::ports::PlanFetcher;
use rungate_types::error::UpstreamError;

use crate::client::JSONAPI_CONTENT_TYPE;

const ENDPOINT: &str = "plan fetch";

/// Fetches the plan JSON export from the caller-supplied URL with the
/// caller-supplied bearer token. Both originate from the signature-
/// verified payload; no statically configured endpoint is involved.
pub struct HttpPlanFetcher {
    client: reqwest::Client,
}

impl HttpPlanFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl PlanFetcher for HttpPlanFetcher {
    async fn fetch_plan(
        &self,
        url: &str,
        token: &SecretString,
    ) -> Result<serde_json::Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .header("Content-type", JSONAPI_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                endpoint: ENDPOINT.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint: ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let plan = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| UpstreamError::MalformedResponse {
                endpoint: ENDPOINT.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("fetched plan document");
        Ok(plan)
    }
}
