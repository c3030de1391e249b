//! vulnhook - security alert webhook relay
//!
//! Receives vulnerability alert webhooks and forwards "create" events to a
//! Slack incoming webhook.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{io::AsyncReadExt, net::TcpListener, sync::watch};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vulnhook::{
    cli::{Cli, Command},
    config::Config,
    relay::RelayError,
    server::WebhookServer,
    services::setup_relay,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(err) => {
            init_logging("info");
            error!("Failed to load configuration: {:#}", err);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    let result = match cli.command() {
        Command::Serve { .. } => serve(&config).await,
        Command::Stdin { dry_run } => relay_stdin(&config, dry_run).await,
    };

    if let Err(err) = &result {
        error!("{:#}", err);
    }
    result
}

/// Logs go to stderr; stdout is reserved for command output.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(config: &Config) -> Result<()> {
    info!("vulnhook starting up...");
    info!("Listen Address: {}", config.server.listen_address);
    info!("Slack Timeout: {}s", config.slack.timeout_seconds);

    let relay = setup_relay(config, false)?;
    let listener = TcpListener::bind(&config.server.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_address))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(WebhookServer::new(listener, relay, shutdown_rx).run());

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping webhook server...");
    shutdown_tx.send(true)?;
    server.await?;

    info!("vulnhook shut down gracefully.");
    Ok(())
}

async fn relay_stdin(config: &Config, dry_run: bool) -> Result<()> {
    let relay = setup_relay(config, dry_run)?;

    let mut body = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut body)
        .await
        .context("Failed to read alert payload from stdin")?;

    match relay.handle(&body).await {
        Ok(outcome) => info!(?outcome, "Processed alert from stdin"),
        Err(e @ RelayError::Decode(_)) => println!("{}", e),
    }
    Ok(())
}
