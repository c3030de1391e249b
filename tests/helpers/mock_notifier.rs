//! A mock notifier that records every message it is asked to send.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vulnhook::formatting::WebhookMessage;
use vulnhook::notification::Notifier;

#[derive(Clone, Debug, Default)]
pub struct MockNotifier {
    pub sent_messages: Arc<Mutex<Vec<WebhookMessage>>>,
}

impl MockNotifier {
    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, message: &WebhookMessage) -> anyhow::Result<()> {
        self.sent_messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}
