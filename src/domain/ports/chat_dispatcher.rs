use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ChatBinding;

/// Port for pushing text/markdown messages into a chat channel.
#[async_trait]
pub trait ChatDispatcher: Send + Sync {
    async fn send_message(&self, binding: &ChatBinding, text: &str) -> DomainResult<()>;
}
