pub mod config;
pub mod intent;
pub mod progress;
pub mod query;
pub mod results;
pub mod session;

pub use config::{
    BackendConfig, ChatConfig, Config, LoggingConfig, QueryDefaults, ServerConfig,
};
pub use intent::{BotReply, Intent};
pub use progress::{ProgressScheme, QueryProgress};
pub use query::{QueryOverrides, QueryRequest, QueryType};
pub use results::{
    AnalysisResults, CitationRecommendationResults, CreatedQuery, Publication, QueryEntry,
    QuerySummary, SearchResults, Trend, TrendResults, TrendType,
};
pub use session::{ChatBinding, QuerySession};
