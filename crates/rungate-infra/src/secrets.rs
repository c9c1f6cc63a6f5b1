//! Secret resolution backends.
//!
//! [`SidecarSecretResolver`] is the production backend: it asks the AWS
//! Parameters and Secrets extension sidecar on loopback for the decrypted
//! value of a named parameter. [`EnvSecretResolver`] reads the parameter
//! name as an environment variable, for local development and tests.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use rungate_core::ports::SecretResolver;
use rungate_types::error::UpstreamError;

/// Endpoint label used in errors and log fields.
const SIDECAR: &str = "secret sidecar";

/// Default port of the Parameters and Secrets extension sidecar.
pub const DEFAULT_SIDECAR_PORT: u16 = 2773;

/// Response shape of `GET /systemsmanager/parameters/get`.
#[derive(Debug, Deserialize)]
struct ParameterResponse {
    #[serde(rename = "Parameter")]
    parameter: Parameter,
}

#[derive(Debug, Deserialize)]
struct Parameter {
    #[serde(rename = "Value")]
    value: String,
}

/// Resolves secrets through the Parameter Store sidecar on loopback.
///
/// The sidecar handles decryption (`withDecryption=true`); the resolved
/// value is wrapped in [`SecretString`] immediately and never logged.
pub struct SidecarSecretResolver {
    client: reqwest::Client,
    base_url: String,
    session_token: SecretString,
}

impl SidecarSecretResolver {
    /// Create a resolver talking to `http://localhost:{port}`.
    ///
    /// `session_token` is the ambient session credential forwarded in the
    /// `X-Aws-Parameters-Secrets-Token` header; it may be empty.
    pub fn new(client: reqwest::Client, port: u16, session_token: SecretString) -> Self {
        Self {
            client,
            base_url: format!("http://localhost:{port}"),
            session_token,
        }
    }

    /// Override the base URL (useful for testing).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl SecretResolver for SidecarSecretResolver {
    async fn resolve(&self, name: &str) -> Result<SecretString, UpstreamError> {
        let url = format!("{}/systemsmanager/parameters/get", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("name", name), ("withDecryption", "true")])
            .header(
                "X-Aws-Parameters-Secrets-Token",
                self.session_token.expose_secret(),
            )
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                endpoint: SIDECAR.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint: SIDECAR.to_string(),
                status: status.as_u16(),
            });
        }

        let parsed: ParameterResponse =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::MalformedResponse {
                    endpoint: SIDECAR.to_string(),
                    message: e.to_string(),
                })?;

        tracing::debug!(parameter = name, "resolved secret via sidecar");
        Ok(SecretString::from(parsed.parameter.value))
    }
}

/// Reads the parameter name as an environment variable.
///
/// Development-only backend: lets the gateway run without the sidecar.
pub struct EnvSecretResolver;

impl EnvSecretResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretResolver for EnvSecretResolver {
    async fn resolve(&self, name: &str) -> Result<SecretString, UpstreamError> {
        match std::env::var(name) {
            Ok(value) => Ok(SecretString::from(value)),
            Err(_) => Err(UpstreamError::Transport {
                endpoint: "environment".to_string(),
                message: format!("variable '{name}' not set"),
            }),
        }
    }
}

/// Deployment-selected secret backend.
///
/// Keeps the service generics concrete while letting the CLI switch
/// between the sidecar and the env backend at startup.
pub enum SecretBackend {
    Sidecar(SidecarSecretResolver),
    Env(EnvSecretResolver),
}

impl SecretResolver for SecretBackend {
    async fn resolve(&self, name: &str) -> Result<SecretString, UpstreamError> {
        match self {
            SecretBackend::Sidecar(inner) => inner.resolve(name).await,
            SecretBackend::Env(inner) => inner.resolve(name).await,
        }
    }
}
