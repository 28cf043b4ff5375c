//! Integration tests for the trend analysis API client
//!
//! Verify request paths and bodies against a mock server, and the mapping
//! of status and decoding failures to domain errors.

use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use trendbot::adapters::trend_api::TrendApiClient;
use trendbot::domain::models::{QueryDefaults, QueryRequest, QueryType};
use trendbot::domain::ports::AnalysisBackend;
use trendbot::DomainError;

fn client(server: &Server) -> TrendApiClient {
    TrendApiClient::new(server.url(), Duration::from_secs(5)).expect("Failed to create client")
}

fn request() -> QueryRequest {
    let mut request = QueryRequest::from_defaults(QueryType::Complete, &QueryDefaults::default());
    request.topics = vec!["AI, robotics".to_string(), "climate change".to_string()];
    request
}

#[tokio::test]
async fn test_create_query_posts_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/queries")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "query_type": 3,
            "topics": ["AI, robotics", "climate change"],
            "start_year": 1980,
            "end_year": 2022,
            "min_citations": 0
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"uuid": "3f2a"}"#)
        .create_async()
        .await;

    let created = client(&server).create_query(&request()).await.unwrap();

    assert_eq!(created.uuid, "3f2a");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_summary_decodes_progress() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/queries/3f2a/summary")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"uuid": "3f2a", "progress": 5}"#)
        .create_async()
        .await;

    let summary = client(&server).get_summary("3f2a").await.unwrap();

    assert_eq!(summary.progress, 5);
    assert_eq!(summary.uuid.as_deref(), Some("3f2a"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_query_decodes_results() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/queries/3f2a")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "uuid": "3f2a",
                "type": 1,
                "progress": 8,
                "topics": ["graph neural networks"],
                "results": {
                    "citation_results": {
                        "publications": [{"title": "GNNs", "authors": [], "citations": 12}]
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let entry = client(&server).get_query("3f2a").await.unwrap();

    assert_eq!(entry.query_type, Some(QueryType::CitationRecommendation));
    let citations = entry.citation_results().unwrap();
    assert_eq!(citations.publications[0].title, "GNNs");
    assert!(entry.search_results().is_none());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/queries/missing/summary")
        .with_status(404)
        .with_body("query not found")
        .create_async()
        .await;

    let err = client(&server).get_summary("missing").await.unwrap_err();

    match err {
        DomainError::BackendStatus {
            operation,
            status,
            body,
        } => {
            assert_eq!(operation, "get_summary");
            assert_eq!(status, 404);
            assert_eq!(body, "query not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/queries")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 7}"#)
        .create_async()
        .await;

    let err = client(&server).create_query(&request()).await.unwrap_err();

    assert!(matches!(err, DomainError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() {
    let client = TrendApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();

    let err = client.get_summary("3f2a").await.unwrap_err();

    assert!(matches!(err, DomainError::BackendUnavailable(_)), "got {err:?}");
}
