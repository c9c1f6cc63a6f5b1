//! Result callback notifier.

use secrecy::{ExposeSecret, SecretString};

use rungate_core::ports::ResultNotifier;
use rungate_types::error::UpstreamError;
use rungate_types::run_task::{TaskResult, TaskResultDocument};

use crate::client::JSONAPI_CONTENT_TYPE;

const ENDPOINT: &str = "result callback";

/// Reports the validation outcome to HCP Terraform with a PATCH to the
/// caller-supplied callback URL.
///
/// A failed notification is not swallowed: it propagates to the handler
/// and the inbound request answers 500 even though validation completed.
pub struct HttpResultNotifier {
    client: reqwest::Client,
}

impl HttpResultNotifier {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ResultNotifier for HttpResultNotifier {
    async fn notify(
        &self,
        url: &str,
        token: &SecretString,
        result: &TaskResult,
    ) -> Result<(), UpstreamError> {
        let document = TaskResultDocument::from(result.clone());

        let response = self
            .client
            .patch(url)
            .bearer_auth(token.expose_secret())
            .header("Content-Type", JSONAPI_CONTENT_TYPE)
            .json(&document)
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

        tracing::info!(status = %result.status, "result callback delivered");
        Ok(())
    }
}
