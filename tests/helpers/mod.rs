//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub mod mock_notifier;

/// A "create" alert payload as sent by the hosting platform.
pub const CREATE_PAYLOAD: &str = r#"{"action":"create","alert":{"external_identifier":"CVE-1","affected_package_name":"foo","affected_range":"<2.0","external_reference":"http://x"},"repository":{"full_name":"org/repo"}}"#;

/// The same alert being dismissed.
pub const DISMISS_PAYLOAD: &str = r#"{"action":"dismiss","alert":{"external_identifier":"CVE-1","affected_package_name":"foo","affected_range":"<2.0","external_reference":"http://x"},"repository":{"full_name":"org/repo"}}"#;

/// The attachment fields expected for `CREATE_PAYLOAD`, as `(title, value)`.
pub const EXPECTED_FIELDS: [(&str, &str); 4] = [
    ("Repository", "org/repo"),
    ("Identifier", "CVE-1"),
    ("Affected Package Name", "foo"),
    ("Affected Range", "<2.0"),
];

/// Extracts `(title, value)` pairs from the first attachment of a webhook body.
pub fn field_pairs(body: &serde_json::Value) -> Vec<(String, String)> {
    body["attachments"][0]["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .map(|f| {
                    (
                        f["title"].as_str().unwrap_or_default().to_string(),
                        f["value"].as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn expected_field_pairs() -> Vec<(String, String)> {
    EXPECTED_FIELDS
        .iter()
        .map(|(t, v)| (t.to_string(), v.to_string()))
        .collect()
}
