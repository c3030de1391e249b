//! The decode → filter → format → dispatch sequence shared by the HTTP
//! handler and the stdin command.

use crate::core::AlertNotification;
use crate::formatting::AttachmentFormatter;
use crate::notification::Notifier;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// The literal text returned to the caller when the inbound body is not a
/// valid alert payload.
pub const DECODE_ERROR_RESPONSE: &str = "Payload decode error";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{}", DECODE_ERROR_RESPONSE)]
    Decode(#[source] serde_json::Error),
}

/// What happened to a decoded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The message was delivered.
    Forwarded,
    /// The action was not "create"; nothing was sent.
    Skipped,
    /// Delivery failed and the error was logged.
    DeliveryFailed,
}

pub struct Relay {
    formatter: AttachmentFormatter,
    notifier: Arc<dyn Notifier>,
}

impl Relay {
    pub fn new(formatter: AttachmentFormatter, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            formatter,
            notifier,
        }
    }

    /// Decodes an inbound request body.
    pub fn decode(body: &[u8]) -> Result<AlertNotification, RelayError> {
        serde_json::from_slice(body).map_err(RelayError::Decode)
    }

    /// Decodes and relays a raw request body.
    pub async fn handle(&self, body: &[u8]) -> Result<RelayOutcome, RelayError> {
        let notification = Self::decode(body)
            .inspect_err(|e| info!(error = ?e, "Rejected malformed alert payload"))?;
        Ok(self.relay(&notification).await)
    }

    /// Formats the notification and hands it to the notifier.
    ///
    /// Delivery errors are logged here and never propagated.
    #[instrument(skip_all, fields(action = %notification.action, alert = %notification.external_identifier))]
    pub async fn relay(&self, notification: &AlertNotification) -> RelayOutcome {
        let Some(message) = self.formatter.format(notification) else {
            debug!("Ignoring alert notification that is not a create event");
            return RelayOutcome::Skipped;
        };

        match self.notifier.send(&message).await {
            Ok(()) => {
                info!(
                    repository = %notification.repository_full_name,
                    package = %notification.affected_package_name,
                    "Forwarded security alert"
                );
                RelayOutcome::Forwarded
            }
            Err(e) => {
                error!(error = %e, "Failed to deliver security alert");
                RelayOutcome::DeliveryFailed
            }
        }
    }
}
