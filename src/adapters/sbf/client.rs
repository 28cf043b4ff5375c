//! HTTP client posting chat messages to SBF bot webhooks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ChatBinding;
use crate::domain::ports::ChatDispatcher;

use super::models::WebhookMessage;

/// Delivers messages through the webhook named in each [`ChatBinding`].
#[derive(Debug, Clone)]
pub struct SbfWebhookClient {
    http: Client,
}

impl SbfWebhookClient {
    pub fn new(timeout: Duration) -> DomainResult<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            DomainError::ChatDispatchFailed(format!("failed to build client: {e}"))
        })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ChatDispatcher for SbfWebhookClient {
    async fn send_message(&self, binding: &ChatBinding, text: &str) -> DomainResult<()> {
        let body = WebhookMessage::chat(&binding.messenger, &binding.channel, text);

        let resp = self
            .http
            .post(&binding.webhook_endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::ChatDispatchFailed(format!(
                    "webhook request to {} failed: {e}",
                    binding.webhook_endpoint
                ))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::ChatDispatchFailed(format!(
                "webhook {} returned {status}: {body}",
                binding.webhook_endpoint
            )));
        }

        tracing::trace!(
            bot = %binding.bot_name,
            channel = %binding.channel,
            "Chat message delivered"
        );
        Ok(())
    }
}
