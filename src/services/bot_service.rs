//! The bot's use cases: start an analysis, repeat the last query with
//! adjusted parameters, and start a citation recommendation search.
//!
//! Each use case submits a backend job, records the session for its
//! conversation, detaches a progress tracker, and answers with a
//! synchronous acknowledgement. Failures never escape as errors; they are
//! logged and turned into a reply the user can act on.

use std::sync::Arc;

use crate::domain::models::{
    BotReply, ChatBinding, ChatConfig, Intent, QueryRequest, QuerySession, QueryType,
};
use crate::domain::ports::AnalysisBackend;

use super::message_formatter;
use super::parameter_extractor::ParameterExtractor;
use super::progress_tracker::ProgressTracker;
use super::session_registry::SessionRegistry;

pub struct BotService {
    backend: Arc<dyn AnalysisBackend>,
    extractor: ParameterExtractor,
    registry: SessionRegistry,
    tracker: ProgressTracker,
    chat: ChatConfig,
}

impl BotService {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        extractor: ParameterExtractor,
        registry: SessionRegistry,
        tracker: ProgressTracker,
        chat: ChatConfig,
    ) -> Self {
        Self {
            backend,
            extractor,
            registry,
            tracker,
            chat,
        }
    }

    /// Start a complete trend analysis for the intent's parameters.
    pub async fn start_analysis(&self, intent: &Intent) -> BotReply {
        let parameters = self
            .extractor
            .extract(intent.entities.as_ref(), QueryType::Complete);
        let chat = self.bind_chat(intent);
        self.submit(intent, parameters, chat, message_formatter::analysis_started)
            .await
    }

    /// Re-run the conversation's last query with the parameters the intent
    /// mentions; everything else is taken from the previous query.
    pub async fn repeat_analysis(&self, intent: &Intent) -> BotReply {
        let Some(previous) = self.registry.get(&intent.conversation_id).await else {
            tracing::info!(
                conversation_id = %intent.conversation_id,
                "Repeat requested without a previous query"
            );
            return BotReply::closing(message_formatter::NO_PREVIOUS_QUERY);
        };

        let overrides = ParameterExtractor::overrides(intent.entities.as_ref());
        let parameters = previous.parameters.with_overrides(&overrides);
        tracing::debug!(
            conversation_id = %intent.conversation_id,
            previous_job_id = %previous.job_id,
            ?overrides,
            "Repeating previous query"
        );
        self.submit(intent, parameters, previous.chat, message_formatter::repeat_started)
            .await
    }

    /// Start a citation recommendation search.
    pub async fn start_citation_recommendation(&self, intent: &Intent) -> BotReply {
        let parameters = self
            .extractor
            .extract(intent.entities.as_ref(), QueryType::CitationRecommendation);
        let chat = self.bind_chat(intent);
        self.submit(
            intent,
            parameters,
            chat,
            message_formatter::citation_search_started,
        )
        .await
    }

    fn bind_chat(&self, intent: &Intent) -> ChatBinding {
        let messenger = intent
            .messenger
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.chat.default_messenger);
        ChatBinding::new(
            &self.chat.sbf_base_url,
            intent.bot_name.as_str(),
            intent.channel.as_str(),
            messenger,
        )
    }

    async fn submit(
        &self,
        intent: &Intent,
        parameters: QueryRequest,
        chat: ChatBinding,
        acknowledge: fn(&QueryRequest) -> String,
    ) -> BotReply {
        let created = match self.backend.create_query(&parameters).await {
            Ok(created) => created,
            Err(err) => {
                tracing::error!(
                    conversation_id = %intent.conversation_id,
                    error = %err,
                    "Failed to create backend query"
                );
                return BotReply::closing(message_formatter::GENERIC_FAILURE);
            }
        };

        let session = QuerySession::new(created.uuid, parameters, chat);
        let reply = BotReply::closing(acknowledge(&session.parameters));

        tracing::info!(
            conversation_id = %intent.conversation_id,
            job_id = %session.job_id,
            query_type = session.parameters.query_type.code(),
            "Query submitted"
        );

        self.registry
            .insert(intent.conversation_id.clone(), session.clone())
            .await;
        self.tracker.spawn(session);

        reply
    }
}
