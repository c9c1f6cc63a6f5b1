//! rungate entry point.
//!
//! Binary name: `rungate`
//!
//! Parses CLI arguments, wires the gateway state, and starts the webhook
//! server. Configuration (secret parameter name, sidecar port, session
//! token) is read here once and passed down explicitly; nothing below
//! `main` touches the process environment.

mod http;
mod state;

use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::{generate, Shell};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use state::{AppState, GatewayConfig};

#[derive(Parser)]
#[command(name = "rungate", about = "HCP Terraform Run Task gateway", version)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Bind port
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Name of the secret parameter holding the HMAC key
        #[arg(long, env = "RUNGATE_HMAC_SECRET_PARAM")]
        hmac_secret_param: String,

        /// Port of the Parameters and Secrets extension sidecar
        #[arg(long, env = "PARAMETERS_SECRETS_EXTENSION_HTTP_PORT", default_value_t = 2773)]
        sidecar_port: u16,

        /// Session credential forwarded to the sidecar
        #[arg(long, env = "AWS_SESSION_TOKEN", default_value = "", hide_env_values = true)]
        session_token: String,

        /// Timeout in seconds applied uniformly to all outbound calls
        #[arg(long, default_value_t = 10)]
        outbound_timeout_secs: u64,

        /// Resolve the HMAC key from an environment variable instead of
        /// the sidecar (local development)
        #[arg(long)]
        env_secrets: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,rungate=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "rungate", &mut std::io::stdout());
            Ok(())
        }

        Commands::Serve {
            host,
            port,
            hmac_secret_param,
            sidecar_port,
            session_token,
            outbound_timeout_secs,
            env_secrets,
        } => {
            let config = GatewayConfig {
                hmac_secret_param,
                sidecar_port,
                session_token: SecretString::from(session_token),
                outbound_timeout: Duration::from_secs(outbound_timeout_secs),
                env_secrets,
            };
            serve(&host, port, config).await
        }
    }
}

async fn serve(host: &str, port: u16, config: GatewayConfig) -> anyhow::Result<()> {
    let state = AppState::init(&config);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} rungate listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {} HMAC key from {} '{}'",
        console::style("🔑").bold(),
        if config.env_secrets {
            "environment variable"
        } else {
            "parameter"
        },
        console::style(&config.hmac_secret_param).yellow()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
