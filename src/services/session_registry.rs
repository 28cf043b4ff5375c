//! Most recent query session per conversation.
//!
//! Lives for the lifetime of the process; nothing is persisted. Only the
//! request handlers touch it. Trackers own their session by value.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::models::QuerySession;

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, QuerySession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest session of a conversation.
    pub async fn get(&self, conversation_id: &str) -> Option<QuerySession> {
        self.sessions.read().await.get(conversation_id).cloned()
    }

    /// Record `session` as the latest of a conversation, returning the one it
    /// supersedes. The superseded session's tracker keeps running.
    pub async fn insert(
        &self,
        conversation_id: impl Into<String>,
        session: QuerySession,
    ) -> Option<QuerySession> {
        self.sessions
            .write()
            .await
            .insert(conversation_id.into(), session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ChatBinding, QueryDefaults, QueryRequest, QueryType};

    fn session(job_id: &str) -> QuerySession {
        QuerySession::new(
            job_id,
            QueryRequest::from_defaults(QueryType::Complete, &QueryDefaults::default()),
            ChatBinding::new("http://sbf", "bot", "C1", "m"),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty().await);
        assert!(registry.insert("conv-1", session("q-1")).await.is_none());

        let stored = registry.get("conv-1").await.unwrap();
        assert_eq!(stored.job_id, "q-1");
        assert!(registry.get("conv-2").await.is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_supersedes_previous() {
        let registry = SessionRegistry::new();
        registry.insert("conv-1", session("q-1")).await;
        let previous = registry.insert("conv-1", session("q-2")).await.unwrap();

        assert_eq!(previous.job_id, "q-1");
        assert_eq!(registry.get("conv-1").await.unwrap().job_id, "q-2");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let registry = SessionRegistry::new();
        let handle = registry.clone();
        handle.insert("conv-1", session("q-1")).await;
        assert!(registry.get("conv-1").await.is_some());
    }
}
