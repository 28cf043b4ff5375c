//! Domain errors for the trendbot adapter.

use thiserror::Error;

/// Domain-level errors that can occur while talking to the analysis
/// backend or the chat platform.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Backend request failed: {0}")]
    BackendUnavailable(String),

    #[error("Backend {operation} returned {status}: {body}")]
    BackendStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Chat dispatch failed: {0}")]
    ChatDispatchFailed(String),

    #[error("Unknown progress code {0} for the configured progress scheme")]
    UnknownProgress(i64),

    #[error("Query {job_id} has no {section} results")]
    MissingResults {
        job_id: String,
        section: &'static str,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;
