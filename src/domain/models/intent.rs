//! Inbound intents from the conversational front-end and the replies sent
//! back synchronously.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An NLU-understood user intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub conversation_id: String,
    pub bot_name: String,
    pub channel: String,
    #[serde(default)]
    pub messenger: Option<String>,
    /// Entities keyed by name, each shaped `{"value": ...}`. Kept loosely
    /// typed; malformed maps are tolerated downstream.
    #[serde(default)]
    pub entities: Option<Value>,
}

/// Synchronous reply to an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotReply {
    pub text: String,
    pub close_context: bool,
}

impl BotReply {
    /// A reply that ends the current dialogue context.
    pub fn closing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            close_context: true,
        }
    }
}
