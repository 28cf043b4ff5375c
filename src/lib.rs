//! trendbot - chat-bot adapter for a trend analysis service
//!
//! Receives NLU intents from a conversational front-end, submits trend
//! analysis and citation recommendation jobs to the analysis backend, and
//! reports job progress back to the chat channel as the job advances.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Query/session models, progress scheme, ports
//! - **Service Layer** (`services`): Intent handling and progress tracking
//! - **Adapters** (`adapters`): Backend client, chat webhook client, HTTP server
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    BotReply, ChatBinding, Config, Intent, ProgressScheme, QueryProgress, QueryRequest,
    QuerySession, QueryType,
};
pub use domain::ports::{AnalysisBackend, ChatDispatcher};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{BotService, ProgressTracker, SessionRegistry, TrackingOutcome};
