//! Service layer: intent handling, progress tracking, and message texts.

pub mod bot_service;
pub mod message_formatter;
pub mod parameter_extractor;
pub mod progress_tracker;
pub mod session_registry;

pub use bot_service::BotService;
pub use message_formatter::MessageFormatter;
pub use parameter_extractor::{parse_topics, ParameterExtractor};
pub use progress_tracker::{ProgressTracker, TrackerConfig, TrackingOutcome};
pub use session_registry::SessionRegistry;
