//! Implementation of the `trendbot serve` command.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::http::BotHttpServer;
use crate::adapters::sbf::SbfWebhookClient;
use crate::adapters::trend_api::TrendApiClient;
use crate::domain::models::Config;
use crate::domain::ports::{AnalysisBackend, ChatDispatcher};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::{
    BotService, MessageFormatter, ParameterExtractor, ProgressTracker, SessionRegistry,
    TrackerConfig,
};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Wire the adapters and services described by `config` into a server.
pub fn build_server(config: &Config) -> Result<BotHttpServer> {
    let backend: Arc<dyn AnalysisBackend> = Arc::new(
        TrendApiClient::from_config(&config.backend).context("Failed to create backend client")?,
    );
    let dispatcher: Arc<dyn ChatDispatcher> = Arc::new(
        SbfWebhookClient::new(Duration::from_secs(config.backend.request_timeout_secs))
            .context("Failed to create chat webhook client")?,
    );

    let tracker = ProgressTracker::new(
        backend.clone(),
        dispatcher,
        config.backend.progress_stages.clone(),
        MessageFormatter::new(config.backend.results_base_url()),
        TrackerConfig::from_backend(&config.backend),
    );
    let service = BotService::new(
        backend,
        ParameterExtractor::new(config.defaults.clone()),
        SessionRegistry::new(),
        tracker,
        config.chat.clone(),
    );

    Ok(BotHttpServer::new(service, config.server.clone()))
}

pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    ConfigLoader::validate(&config)?;

    let log_config = LogConfig::try_from(&config.logging)?;
    let _logger = LoggerImpl::init(&log_config)?;

    tracing::info!(
        backend = %config.backend.base_url,
        sbf = %config.chat.sbf_base_url,
        progress_stages = ?config.backend.progress_stages.stages(),
        "Starting trendbot"
    );

    build_server(&config)?
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("HTTP server failed: {e}"))?;

    tracing::info!("trendbot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
