//! Prints webhook messages to stdout instead of delivering them.
//!
//! Used by `vulnhook stdin --dry-run` to inspect the exact body that would be
//! posted to Slack.

use crate::formatting::WebhookMessage;
use crate::notification::Notifier;
use async_trait::async_trait;
use std::io::Write;
use tracing::debug;

pub struct StdoutNotifier;

impl StdoutNotifier {
    fn render(message: &WebhookMessage) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(message)?)
    }
}

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, message: &WebhookMessage) -> anyhow::Result<()> {
        let rendered = Self::render(message)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
        debug!("Printed webhook message to stdout.");
        Ok(())
    }
}
