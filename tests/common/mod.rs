//! Common test utilities for integration tests
//!
//! Provides in-memory fakes for the backend and chat ports plus session
//! fixtures shared across integration test files.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use trendbot::domain::errors::{DomainError, DomainResult};
use trendbot::domain::models::{
    ChatBinding, CreatedQuery, QueryDefaults, QueryEntry, QueryRequest, QuerySession,
    QuerySummary, QueryType,
};
use trendbot::domain::ports::{AnalysisBackend, ChatDispatcher};
use trendbot::services::{MessageFormatter, ProgressTracker, TrackerConfig};
use trendbot::ProgressScheme;

pub const JOB_ID: &str = "job-1";
pub const RESULTS_BASE_URL: &str = "http://frontend.test";

/// Backend fake that replays a script of summary polls.
///
/// Each poll pops the next step; `Err` steps simulate an unreachable
/// backend. Once the script is exhausted every poll fails.
#[derive(Default)]
pub struct ScriptedBackend {
    polls: Mutex<VecDeque<Result<i64, String>>>,
    entry: Mutex<Option<QueryEntry>>,
    staged_entries: Mutex<VecDeque<Option<QueryEntry>>>,
    fail_create: bool,
    created: Mutex<Vec<QueryRequest>>,
    entry_fetches: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn with_progress(codes: &[i64]) -> Self {
        Self::with_polls(codes.iter().copied().map(Ok).collect())
    }

    pub fn with_polls(polls: Vec<Result<i64, String>>) -> Self {
        Self {
            polls: Mutex::new(polls.into()),
            entry: Mutex::new(Some(full_entry())),
            ..Default::default()
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Default::default()
        }
    }

    pub fn set_entry(&self, entry: Option<QueryEntry>) {
        *self.entry.lock().unwrap() = entry;
    }

    /// Serve `entries` to the next record fetches, one per fetch, before
    /// falling back to the regular entry.
    pub fn stage_entries(&self, entries: Vec<Option<QueryEntry>>) {
        self.staged_entries.lock().unwrap().extend(entries);
    }

    pub fn created(&self) -> Vec<QueryRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn entry_fetches(&self) -> usize {
        *self.entry_fetches.lock().unwrap()
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn create_query(&self, request: &QueryRequest) -> DomainResult<CreatedQuery> {
        if self.fail_create {
            return Err(DomainError::BackendUnavailable("connection refused".to_string()));
        }
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        Ok(CreatedQuery {
            uuid: format!("job-{}", created.len()),
        })
    }

    async fn get_query(&self, job_id: &str) -> DomainResult<QueryEntry> {
        *self.entry_fetches.lock().unwrap() += 1;
        let staged = self.staged_entries.lock().unwrap().pop_front();
        staged
            .unwrap_or_else(|| self.entry.lock().unwrap().clone())
            .ok_or_else(|| DomainError::BackendStatus {
                operation: "get_query",
                status: 404,
                body: format!("no query {job_id}"),
            })
    }

    async fn get_summary(&self, job_id: &str) -> DomainResult<QuerySummary> {
        match self.polls.lock().unwrap().pop_front() {
            Some(Ok(progress)) => Ok(QuerySummary {
                uuid: Some(job_id.to_string()),
                progress,
            }),
            Some(Err(message)) => Err(DomainError::BackendUnavailable(message)),
            None => Err(DomainError::BackendUnavailable("script exhausted".to_string())),
        }
    }
}

/// Chat fake that records every delivered message in order.
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(ChatBinding, String)>>,
    fail: bool,
}

impl RecordingDispatcher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn bindings(&self) -> Vec<ChatBinding> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(binding, _)| binding.clone())
            .collect()
    }
}

#[async_trait]
impl ChatDispatcher for RecordingDispatcher {
    async fn send_message(&self, chat: &ChatBinding, text: &str) -> DomainResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat.clone(), text.to_string()));
        if self.fail {
            return Err(DomainError::ChatDispatchFailed("webhook returned 502".to_string()));
        }
        Ok(())
    }
}

/// Tracker config with a short poll interval and no deadline.
pub fn fast_tracker_config() -> TrackerConfig {
    TrackerConfig {
        poll_interval: Duration::from_millis(1),
        max_consecutive_failures: 3,
        max_duration: None,
    }
}

pub fn tracker(
    backend: Arc<ScriptedBackend>,
    dispatcher: Arc<RecordingDispatcher>,
    config: TrackerConfig,
) -> ProgressTracker {
    ProgressTracker::new(
        backend,
        dispatcher,
        ProgressScheme::default(),
        MessageFormatter::new(RESULTS_BASE_URL),
        config,
    )
}

pub fn session(query_type: QueryType) -> QuerySession {
    let mut parameters = QueryRequest::from_defaults(query_type, &QueryDefaults::default());
    parameters.topics = vec!["machine learning".to_string()];
    QuerySession::new(
        JOB_ID,
        parameters,
        ChatBinding::new("http://sbf.test", "TrendBot", "C42", "rocket.chat"),
    )
}

/// A job record whose citation results are not available yet.
pub fn entry_without_citations() -> QueryEntry {
    let mut entry = full_entry();
    if let Some(results) = entry.results.as_mut() {
        results.citation_results = None;
    }
    entry
}

/// A job record with search, trend and citation results.
pub fn full_entry() -> QueryEntry {
    serde_json::from_value(json!({
        "uuid": JOB_ID,
        "type": 3,
        "progress": 8,
        "results": {
            "search_results": {"raw": [3.0, 4.0, 5.0], "adjusted": [], "pub_types": {}},
            "trend_results": {
                "breakpoints": [2005],
                "sub_trends": [
                    {"start": 1990, "end": 2005, "type": 1, "slope": 0.8, "line": []},
                    {"start": 2005, "end": 2020, "type": 2, "slope": -0.2, "line": []}
                ],
                "trend_description": "Interest peaked in 2005."
            },
            "citation_results": {
                "publications": [{
                    "title": "Deep Learning",
                    "doi": "10.1038/nature14539",
                    "authors": ["Y. LeCun", "Y. Bengio", "G. Hinton"],
                    "year": 2015,
                    "distance": 0.042,
                    "citations": 50000
                }]
            }
        }
    }))
    .unwrap()
}
