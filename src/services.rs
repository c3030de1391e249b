//! Encapsulation for setting up the relay and its notifier.

use crate::{
    config::Config,
    formatting::AttachmentFormatter,
    notification::{slack::SlackClient, stdout::StdoutNotifier, Notifier},
    relay::Relay,
};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::info;

/// Picks the notifier for this run.
///
/// A dry run prints messages to stdout; otherwise a Slack webhook URL is required.
pub fn setup_notifier(config: &Config, dry_run: bool) -> Result<Arc<dyn Notifier>> {
    if dry_run {
        info!("Dry run: webhook messages will be printed to stdout.");
        return Ok(Arc::new(StdoutNotifier));
    }

    let webhook_url = config
        .slack
        .webhook_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("No Slack webhook URL configured; set WEBHOOK_URL or slack.webhook_url")
        })?;

    Ok(Arc::new(SlackClient::new(
        webhook_url.to_string(),
        Duration::from_secs(config.slack.timeout_seconds),
    )))
}

/// Builds the relay used by both the HTTP server and the stdin command.
pub fn setup_relay(config: &Config, dry_run: bool) -> Result<Arc<Relay>> {
    let notifier = setup_notifier(config, dry_run)?;
    let formatter = AttachmentFormatter::new(config.slack.author_name.clone());
    Ok(Arc::new(Relay::new(formatter, notifier)))
}
