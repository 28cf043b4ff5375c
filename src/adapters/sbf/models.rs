//! SBF webhook payloads.

use serde::{Deserialize, Serialize};

/// Event name the bot manager expects for outgoing chat messages.
pub const CHAT_MESSAGE_EVENT: &str = "chat_message";

/// Body posted to `/SBFManager/bots/{bot}/webhook`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub event: String,
    pub messenger: String,
    pub channel: String,
    pub message: String,
}

impl WebhookMessage {
    /// A `chat_message` event carrying `message`.
    pub fn chat(messenger: &str, channel: &str, message: &str) -> Self {
        Self {
            event: CHAT_MESSAGE_EVENT.to_string(),
            messenger: messenger.to_string(),
            channel: channel.to_string(),
            message: message.to_string(),
        }
    }
}
