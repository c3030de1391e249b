//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged over
//! the configuration file and environment variables.

use clap::{Parser, Subcommand};
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Forwards security alert webhooks to a Slack channel.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Slack incoming webhook URL.
    #[arg(long, value_name = "URL", global = true)]
    pub webhook_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Listen for alert webhooks over HTTP (the default).
    Serve {
        /// Socket address to listen on.
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },
    /// Read a single alert payload from standard input.
    Stdin {
        /// Print the Slack message instead of posting it.
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// The subcommand to run; `serve` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { listen: None })
    }
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        if let Some(url) = &self.webhook_url {
            let mut slack = Dict::new();
            slack.insert("webhook_url".into(), Value::from(url.clone()));
            dict.insert("slack".into(), Value::from(slack));
        }

        if let Some(Command::Serve {
            listen: Some(address),
        }) = &self.command
        {
            let mut server = Dict::new();
            server.insert("listen_address".into(), Value::from(address.clone()));
            dict.insert("server".into(), Value::from(server));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
