//! Configuration management for vulnhook
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer defaults, an optional TOML file, environment
//! variables and command-line arguments.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Environment variable holding the Slack incoming webhook URL.
pub const WEBHOOK_URL_ENV: &str = "WEBHOOK_URL";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the inbound webhook server.
    pub server: ServerConfig,
    /// Configuration for the outbound Slack webhook.
    pub slack: SlackConfig,
}

/// Configuration for the inbound webhook server.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. "0.0.0.0:8080".
    pub listen_address: String,
}

/// Configuration for the outbound Slack webhook.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SlackConfig {
    /// The Slack incoming webhook URL.
    pub webhook_url: Option<String>,
    /// Request timeout for the webhook POST, in seconds.
    pub timeout_seconds: u64,
    /// Author shown on the attachment, if any.
    pub author_name: Option<String>,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Precedence, lowest first: defaults, the TOML file given with `--config`,
    /// `VULNHOOK_*` variables, `WEBHOOK_URL`, command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            if !path.exists() {
                anyhow::bail!("Configuration file not found at {:?}", path);
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            // e.g. VULNHOOK_SLACK__TIMEOUT_SECONDS=5
            .merge(Env::prefixed("VULNHOOK_").split("__"))
            .merge(
                Env::raw()
                    .only(&[WEBHOOK_URL_ENV])
                    .map(|_| "slack.webhook_url".into()),
            )
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig {
                listen_address: "0.0.0.0:8080".to_string(),
            },
            slack: SlackConfig {
                webhook_url: None,
                timeout_seconds: 10,
                author_name: None,
            },
        }
    }
}
