//! Bot webhook HTTP server.
//!
//! Exposes the three intent endpoints of the bot. Every endpoint answers
//! synchronously with a [`BotReply`]; progress updates for accepted jobs
//! arrive later through the chat webhook.

use axum::{extract::State, response::Json, routing::get, routing::post, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::models::{BotReply, Intent, ServerConfig};
use crate::services::BotService;

/// Shared state for the bot HTTP server.
struct AppState {
    service: BotService,
}

/// Status response of the root endpoint.
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

/// Bot webhook HTTP server.
pub struct BotHttpServer {
    config: ServerConfig,
    service: BotService,
}

impl BotHttpServer {
    pub fn new(service: BotService, config: ServerConfig) -> Self {
        Self { config, service }
    }

    /// Build the router with all endpoints.
    pub fn into_router(self) -> Router {
        let state = Arc::new(AppState {
            service: self.service,
        });

        let app = Router::new()
            .route("/", get(status))
            .route("/api/analysis", post(start_analysis))
            .route("/api/analysis/repeat", post(repeat_analysis))
            .route("/api/citrec", post(start_citation_recommendation))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn bind_address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.bind_address()?;
        let router = self.into_router();

        tracing::info!("Bot HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "online" })
}

async fn start_analysis(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<Intent>,
) -> Json<BotReply> {
    Json(state.service.start_analysis(&intent).await)
}

async fn repeat_analysis(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<Intent>,
) -> Json<BotReply> {
    Json(state.service.repeat_analysis(&intent).await)
}

async fn start_citation_recommendation(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<Intent>,
) -> Json<BotReply> {
    Json(state.service.start_citation_recommendation(&intent).await)
}
