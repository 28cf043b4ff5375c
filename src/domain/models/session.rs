//! Query sessions and the chat channel they report to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query::QueryRequest;

/// Where progress messages for a session are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBinding {
    pub bot_name: String,
    pub channel: String,
    pub messenger: String,
    pub webhook_endpoint: String,
}

impl ChatBinding {
    /// Bind to `channel` through the webhook of `bot_name` on the chat platform
    /// reachable at `sbf_base_url`.
    pub fn new(
        sbf_base_url: &str,
        bot_name: impl Into<String>,
        channel: impl Into<String>,
        messenger: impl Into<String>,
    ) -> Self {
        let bot_name = bot_name.into();
        let webhook_endpoint = format!(
            "{}/SBFManager/bots/{}/webhook",
            sbf_base_url.trim_end_matches('/'),
            bot_name
        );
        Self {
            bot_name,
            channel: channel.into(),
            messenger: messenger.into(),
            webhook_endpoint,
        }
    }
}

/// A submitted job together with its parameters and chat binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySession {
    /// Backend-issued job identifier.
    pub job_id: String,
    pub parameters: QueryRequest,
    pub chat: ChatBinding,
    pub created_at: DateTime<Utc>,
}

impl QuerySession {
    pub fn new(job_id: impl Into<String>, parameters: QueryRequest, chat: ChatBinding) -> Self {
        Self {
            job_id: job_id.into(),
            parameters,
            chat,
            created_at: Utc::now(),
        }
    }
}
