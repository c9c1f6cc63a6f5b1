//! Application state wiring the concrete infra into the generic service.
//!
//! `RunTaskService` is generic over its ports; `AppState` pins it to the
//! reqwest-backed implementations (or the env secret backend for local
//! runs) and shares it across requests behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use rungate_core::policy::MinuteParityPolicy;
use rungate_core::service::RunTaskService;
use rungate_infra::callback::HttpResultNotifier;
use rungate_infra::client::build_client;
use rungate_infra::plan::HttpPlanFetcher;
use rungate_infra::secrets::{EnvSecretResolver, SecretBackend, SidecarSecretResolver};

/// Gateway configuration, resolved by the CLI before state construction.
///
/// Everything the handler needs is an explicit field here; nothing is
/// looked up from the process environment past this point.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Name of the secret parameter holding the HMAC key.
    pub hmac_secret_param: String,
    /// Port of the Parameters and Secrets extension sidecar.
    pub sidecar_port: u16,
    /// Ambient session credential forwarded to the sidecar; may be empty.
    /// Wrapped so the derived `Debug` never prints it.
    pub session_token: SecretString,
    /// Uniform timeout applied to all outbound calls.
    pub outbound_timeout: Duration,
    /// Resolve the HMAC key from an environment variable instead of the
    /// sidecar (local development).
    pub env_secrets: bool,
}

/// Service generics pinned to the concrete infra implementations.
pub type ConcreteRunTaskService =
    RunTaskService<SecretBackend, HttpPlanFetcher, HttpResultNotifier, MinuteParityPolicy>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteRunTaskService>,
}

impl AppState {
    /// Wire the outbound client and service from an explicit config.
    pub fn init(config: &GatewayConfig) -> Self {
        let client = build_client(config.outbound_timeout);

        let secrets = if config.env_secrets {
            SecretBackend::Env(EnvSecretResolver::new())
        } else {
            SecretBackend::Sidecar(SidecarSecretResolver::new(
                client.clone(),
                config.sidecar_port,
                config.session_token.clone(),
            ))
        };

        let service = RunTaskService::new(
            config.hmac_secret_param.clone(),
            secrets,
            HttpPlanFetcher::new(client.clone()),
            HttpResultNotifier::new(client),
            MinuteParityPolicy::new(),
        );

        Self {
            service: Arc::new(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_session_token() {
        let config = GatewayConfig {
            hmac_secret_param: "hmac-key".to_string(),
            sidecar_port: 2773,
            session_token: SecretString::from("aws-session-credential"),
            outbound_timeout: Duration::from_secs(10),
            env_secrets: false,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("aws-session-credential"));
    }
}
