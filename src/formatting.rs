// src/formatting.rs

use crate::core::AlertNotification;
use chrono::{DateTime, Utc};
use serde::Serialize;

const ATTACHMENT_COLOR: &str = "warning";
const ATTACHMENT_PRETEXT: &str = ":warning: Security alert created! :warning:";
const ATTACHMENT_TITLE: &str = "Security alert(CVE link)";

/// The body of a Slack incoming-webhook request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub attachments: Vec<Attachment>,
}

/// A legacy Slack message attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub color: String,
    pub pretext: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_subname: Option<String>,
    pub title: String,
    pub title_link: String,
    /// Unix timestamp in seconds.
    pub ts: i64,
    pub fields: Vec<AttachmentField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    fn short(title: &str, value: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            short: true,
        }
    }
}

/// Builds Slack attachments out of alert notifications.
#[derive(Debug, Clone, Default)]
pub struct AttachmentFormatter {
    author: Option<String>,
}

impl AttachmentFormatter {
    pub fn new(author: Option<String>) -> Self {
        Self { author }
    }

    /// Formats a notification using the current time.
    ///
    /// Returns `None` for every action other than "create".
    pub fn format(&self, notification: &AlertNotification) -> Option<WebhookMessage> {
        self.format_at(notification, Utc::now())
    }

    /// Formats a notification, stamping the attachment with `now`.
    pub fn format_at(
        &self,
        notification: &AlertNotification,
        now: DateTime<Utc>,
    ) -> Option<WebhookMessage> {
        if !notification.is_create() {
            return None;
        }

        Some(WebhookMessage {
            attachments: vec![self.build_attachment(notification, now)],
        })
    }

    fn build_attachment(&self, notification: &AlertNotification, now: DateTime<Utc>) -> Attachment {
        // Field order is part of the message layout.
        let fields = vec![
            AttachmentField::short("Repository", &notification.repository_full_name),
            AttachmentField::short("Identifier", &notification.external_identifier),
            AttachmentField::short("Affected Package Name", &notification.affected_package_name),
            AttachmentField::short("Affected Range", &notification.affected_range),
        ];

        Attachment {
            color: ATTACHMENT_COLOR.to_string(),
            pretext: ATTACHMENT_PRETEXT.to_string(),
            author_name: self.author.clone(),
            author_subname: self.author.clone(),
            title: ATTACHMENT_TITLE.to_string(),
            title_link: notification.external_reference.clone(),
            ts: now.timestamp(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn create_test_notification(action: &str) -> AlertNotification {
        AlertNotification {
            action: action.to_string(),
            external_identifier: "CVE-1".to_string(),
            affected_package_name: "foo".to_string(),
            affected_range: "<2.0".to_string(),
            external_reference: "http://x".to_string(),
            repository_full_name: "org/repo".to_string(),
            ..Default::default()
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fields_follow_fixed_order() {
        let formatter = AttachmentFormatter::default();
        let message = formatter
            .format_at(&create_test_notification("create"), fixed_time())
            .unwrap();

        assert_eq!(message.attachments.len(), 1);
        let pairs: Vec<(&str, &str)> = message.attachments[0]
            .fields
            .iter()
            .map(|f| (f.title.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Repository", "org/repo"),
                ("Identifier", "CVE-1"),
                ("Affected Package Name", "foo"),
                ("Affected Range", "<2.0"),
            ]
        );
        assert!(message.attachments[0].fields.iter().all(|f| f.short));
    }

    #[test]
    fn test_identifier_links_to_reference() {
        let formatter = AttachmentFormatter::default();
        let message = formatter
            .format_at(&create_test_notification("create"), fixed_time())
            .unwrap();

        let attachment = &message.attachments[0];
        assert_eq!(attachment.title_link, "http://x");
        assert_eq!(attachment.ts, fixed_time().timestamp());
        assert_eq!(attachment.color, "warning");
    }

    #[test]
    fn test_non_create_actions_are_dropped() {
        let formatter = AttachmentFormatter::default();
        for action in ["dismiss", "resolve", "", "CREATE"] {
            assert!(
                formatter
                    .format_at(&create_test_notification(action), fixed_time())
                    .is_none(),
                "action {:?} should not be formatted",
                action
            );
        }
    }

    #[test]
    fn test_empty_fields_pass_through() {
        let formatter = AttachmentFormatter::default();
        let notification = AlertNotification {
            action: "create".to_string(),
            ..Default::default()
        };
        let message = formatter.format_at(&notification, fixed_time()).unwrap();

        assert_eq!(message.attachments[0].title_link, "");
        assert!(message.attachments[0].fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_serialized_webhook_body() {
        let formatter = AttachmentFormatter::default();
        let message = formatter
            .format_at(&create_test_notification("create"), fixed_time())
            .unwrap();

        let expected = json!({
            "attachments": [{
                "color": "warning",
                "pretext": ":warning: Security alert created! :warning:",
                "title": "Security alert(CVE link)",
                "title_link": "http://x",
                "ts": fixed_time().timestamp(),
                "fields": [
                    { "title": "Repository", "value": "org/repo", "short": true },
                    { "title": "Identifier", "value": "CVE-1", "short": true },
                    { "title": "Affected Package Name", "value": "foo", "short": true },
                    { "title": "Affected Range", "value": "<2.0", "short": true }
                ]
            }]
        });
        assert_eq!(serde_json::to_value(&message).unwrap(), expected);
    }

    #[test]
    fn test_author_is_included_when_configured() {
        let formatter = AttachmentFormatter::new(Some("security-bot".to_string()));
        let message = formatter
            .format_at(&create_test_notification("create"), fixed_time())
            .unwrap();

        let body = serde_json::to_value(&message).unwrap();
        assert_eq!(body["attachments"][0]["author_name"], "security-bot");
        assert_eq!(body["attachments"][0]["author_subname"], "security-bot");
    }
}
