//! Port trait definitions (Hexagonal Architecture)
//!
//! - AnalysisBackend: job submission and progress queries
//! - ChatDispatcher: message delivery to a chat channel

pub mod analysis_backend;
pub mod chat_dispatcher;

pub use analysis_backend::AnalysisBackend;
pub use chat_dispatcher::ChatDispatcher;
