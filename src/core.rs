//! Core domain types for vulnhook
//!
//! This module defines the inbound alert notification as it arrives from the
//! source hosting platform, along with the wire structs it is decoded from.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

type JsonObject = Map<String, Value>;

/// The only action that produces a chat message.
pub const CREATE_ACTION: &str = "create";

/// A security alert notification received from the hosting platform.
///
/// Decoded from the nested webhook payload and flattened so the rest of the
/// application never deals with the wire layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct AlertNotification {
    /// Numeric alert id assigned by the platform
    pub identifier: i64,
    /// Vulnerable version range, e.g. "< 2.0"
    pub affected_range: String,
    /// Name of the vulnerable dependency
    pub affected_package_name: String,
    /// Advisory URL
    pub external_reference: String,
    /// Advisory id, usually a CVE or GHSA id
    pub external_identifier: String,
    /// First version containing the fix
    pub fixed_in: String,
    /// Alert lifecycle action: "create", "dismiss" or "resolve"
    pub action: String,
    /// `owner/name` of the affected repository
    pub repository_full_name: String,
}

impl AlertNotification {
    /// Returns true if this notification announces a newly created alert.
    pub fn is_create(&self) -> bool {
        self.action == CREATE_ACTION
    }
}

#[derive(Debug, Default, Deserialize)]
struct AlertPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    action: String,
    #[serde(default, deserialize_with = "object_or_default")]
    alert: AlertDetails,
    #[serde(default, deserialize_with = "object_or_default")]
    repository: RepositoryDetails,
}

#[derive(Debug, Default, Deserialize)]
struct AlertDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    affected_range: String,
    #[serde(default, deserialize_with = "null_as_default")]
    affected_package_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    external_reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    external_identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    fixed_in: String,
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    full_name: String,
}

impl From<AlertPayload> for AlertNotification {
    fn from(payload: AlertPayload) -> Self {
        Self {
            identifier: payload.alert.id,
            affected_range: payload.alert.affected_range,
            affected_package_name: payload.alert.affected_package_name,
            external_reference: payload.alert.external_reference,
            external_identifier: payload.alert.external_identifier,
            fixed_in: payload.alert.fixed_in,
            action: payload.action,
            repository_full_name: payload.repository.full_name,
        }
    }
}

impl TryFrom<JsonObject> for AlertNotification {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        AlertPayload::deserialize(Value::Object(object)).map(Self::from)
    }
}

/// Decodes a nested JSON object, treating `null` as a missing field.
///
/// Derived struct deserializers also accept arrays by position; this only
/// accepts objects.
fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    match Option::<JsonObject>::deserialize(deserializer)? {
        Some(object) => T::deserialize(Value::Object(object)).map_err(D::Error::custom),
        None => Ok(T::default()),
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
