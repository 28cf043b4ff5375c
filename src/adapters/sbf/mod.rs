//! Adapter for the social bot framework (SBF) chat webhooks.

pub mod client;
pub mod models;

pub use client::SbfWebhookClient;
pub use models::WebhookMessage;
