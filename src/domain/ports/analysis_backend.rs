use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CreatedQuery, QueryEntry, QueryRequest, QuerySummary};

/// Port to the external trend analysis / citation recommendation service.
///
/// The service itself is opaque: jobs are submitted, then observed through
/// their summary and full record until they reach a terminal stage.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit a new job.
    async fn create_query(&self, request: &QueryRequest) -> DomainResult<CreatedQuery>;

    /// Fetch the full job record including nested results.
    async fn get_query(&self, job_id: &str) -> DomainResult<QueryEntry>;

    /// Fetch the lightweight progress summary of a job.
    async fn get_summary(&self, job_id: &str) -> DomainResult<QuerySummary>;
}
