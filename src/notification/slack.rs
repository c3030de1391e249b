//! A client for posting messages to a Slack incoming webhook.

use crate::formatting::WebhookMessage;
use crate::notification::Notifier;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::task;
use tracing::{error, info, instrument};

/// Default request timeout for the webhook POST.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A client for sending messages to a Slack webhook.
pub struct SlackClient {
    webhook_url: String,
    timeout: Duration,
}

impl SlackClient {
    /// Creates a new `SlackClient`.
    pub fn new(webhook_url: String, timeout: Duration) -> Self {
        Self {
            webhook_url,
            timeout,
        }
    }

    /// Posts the payload and returns the response status with its body text.
    ///
    /// Runs on the blocking pool; the body is only kept for logging.
    fn post_blocking(
        webhook_url: &str,
        timeout: Duration,
        payload: &WebhookMessage,
    ) -> reqwest::Result<(StatusCode, String)> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let response = client.post(webhook_url).json(payload).send()?;
        let status = response.status();
        Ok((status, response.text().unwrap_or_default()))
    }
}

#[async_trait]
impl Notifier for SlackClient {
    /// Posts the message to the configured Slack webhook.
    ///
    /// Any non-2xx reply is an error; Slack explains rejections in the body.
    #[instrument(skip(self, message), fields(attachments = message.attachments.len()))]
    async fn send(&self, message: &WebhookMessage) -> anyhow::Result<()> {
        let webhook_url = self.webhook_url.clone();
        let timeout = self.timeout;
        let payload = message.clone();
        let (status, body) =
            task::spawn_blocking(move || Self::post_blocking(&webhook_url, timeout, &payload))
                .await?
                .inspect_err(|e| error!(error = %e, "HTTP request to Slack failed"))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Slack webhook rejected the message");
            anyhow::bail!("Slack webhook returned {}: {}", status, body);
        }

        info!("Successfully posted alert to Slack.");
        Ok(())
    }
}
