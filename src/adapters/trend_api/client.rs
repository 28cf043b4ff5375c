//! HTTP client for the trend analysis API.
//!
//! Wraps the three job endpoints used by the adapter: job creation, the
//! full job record, and the progress summary. All methods map transport,
//! status, and decoding failures to [`DomainError`] variants.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BackendConfig, CreatedQuery, QueryEntry, QueryRequest, QuerySummary};
use crate::domain::ports::AnalysisBackend;

/// HTTP client for the trend analysis API.
#[derive(Debug, Clone)]
pub struct TrendApiClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL without trailing slash, e.g. `http://trends:8000`.
    base_url: String,
}

impl TrendApiClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::BackendUnavailable(format!("failed to build client: {e}")))?;
        Ok(Self::with_http_client(http, base_url))
    }

    /// Create a client from backend configuration.
    pub fn from_config(config: &BackendConfig) -> DomainResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn queries_url(&self) -> String {
        format!("{}/api/queries", self.base_url)
    }

    fn query_url(&self, job_id: &str) -> String {
        format!("{}/api/queries/{}", self.base_url, job_id)
    }

    fn summary_url(&self, job_id: &str) -> String {
        format!("{}/api/queries/{}/summary", self.base_url, job_id)
    }

    /// Check the status and decode the JSON body of a backend response.
    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        resp: Response,
    ) -> DomainResult<T> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::BackendStatus {
                operation,
                status,
                body,
            });
        }

        resp.json::<T>().await.map_err(|e| {
            DomainError::InvalidResponse(format!("{operation} parse failed: {e}"))
        })
    }
}

#[async_trait]
impl AnalysisBackend for TrendApiClient {
    async fn create_query(&self, request: &QueryRequest) -> DomainResult<CreatedQuery> {
        let resp = self
            .http
            .post(self.queries_url())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                DomainError::BackendUnavailable(format!("create_query request failed: {e}"))
            })?;

        let created: CreatedQuery = Self::decode("create_query", resp).await?;
        tracing::debug!(job_id = %created.uuid, topics = ?request.topics, "Backend job created");
        Ok(created)
    }

    async fn get_query(&self, job_id: &str) -> DomainResult<QueryEntry> {
        let resp = self
            .http
            .get(self.query_url(job_id))
            .send()
            .await
            .map_err(|e| {
                DomainError::BackendUnavailable(format!("get_query request failed: {e}"))
            })?;

        Self::decode("get_query", resp).await
    }

    async fn get_summary(&self, job_id: &str) -> DomainResult<QuerySummary> {
        let resp = self
            .http
            .get(self.summary_url(job_id))
            .send()
            .await
            .map_err(|e| {
                DomainError::BackendUnavailable(format!("get_summary request failed: {e}"))
            })?;

        Self::decode("get_summary", resp).await
    }
}
