//! Delivery of formatted chat messages.
//!
//! The relay only talks to the [`Notifier`] trait, so the Slack webhook client
//! and the stdout printer used for dry runs are interchangeable.
pub mod slack;
pub mod stdout;

use crate::formatting::WebhookMessage;
use async_trait::async_trait;

/// A destination that can deliver a single webhook message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers the message. No retries are attempted.
    async fn send(&self, message: &WebhookMessage) -> anyhow::Result<()>;
}
