/// vulnhook - forwards source hosting security alerts to Slack
///
/// The library decodes vulnerability alert webhooks, turns "create" events
/// into Slack attachments and posts them to an incoming webhook, either from
/// an HTTP server or from a payload piped on stdin.
pub mod cli;
pub mod config;
pub mod core;
pub mod formatting;
pub mod notification;
pub mod relay;
pub mod server;
pub mod services;

// Re-export core types for convenience
pub use crate::core::AlertNotification;
