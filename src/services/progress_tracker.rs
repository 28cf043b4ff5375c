//! Background progress tracking for submitted jobs.
//!
//! One tracker task runs per [`QuerySession`]. It polls the backend summary
//! at a fixed interval, decodes the progress code with the configured
//! [`ProgressScheme`], and fires a stage handler for every stage passed
//! since the previous poll, in scheme order, exactly once. Tracking stops
//! when the job finishes or fails, when the tracking deadline passes, or
//! after too many failed polls in a row.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Instrument;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BackendConfig, ProgressScheme, QueryProgress, QuerySession, QueryType};
use crate::domain::ports::{AnalysisBackend, ChatDispatcher};

use super::message_formatter::{self, MessageFormatter};

/// Configuration for progress tracking.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Interval between summary polls.
    pub poll_interval: Duration,
    /// Failed polls in a row before tracking is abandoned.
    pub max_consecutive_failures: u32,
    /// Maximum time a single job is tracked.
    pub max_duration: Option<Duration>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_consecutive_failures: 5,
            max_duration: Some(Duration::from_secs(3600)),
        }
    }
}

impl TrackerConfig {
    pub fn from_backend(config: &BackendConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_consecutive_failures: config.max_consecutive_poll_failures.max(1),
            max_duration: config.max_tracking_secs.map(Duration::from_secs),
        }
    }
}

/// How a tracker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingOutcome {
    /// The job reached `finished`.
    Finished,
    /// The backend reported `failed`.
    Failed,
    /// The tracking deadline passed first.
    TimedOut,
    /// Too many polls failed in a row.
    Abandoned,
}

/// Which messages a job produces, derived from its query type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackingPlan {
    trends: bool,
    citations: bool,
}

impl TrackingPlan {
    const fn for_query_type(query_type: QueryType) -> Self {
        Self {
            trends: query_type.includes_trends(),
            citations: query_type.includes_citations(),
        }
    }
}

/// What has already been reported for the tracked job.
#[derive(Debug, Default)]
struct Reported {
    citations: bool,
    results_link: bool,
}

/// Polls job progress and reports it to the session's chat channel.
#[derive(Clone)]
pub struct ProgressTracker {
    backend: Arc<dyn AnalysisBackend>,
    dispatcher: Arc<dyn ChatDispatcher>,
    scheme: ProgressScheme,
    formatter: MessageFormatter,
    config: TrackerConfig,
}

impl ProgressTracker {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        dispatcher: Arc<dyn ChatDispatcher>,
        scheme: ProgressScheme,
        formatter: MessageFormatter,
        config: TrackerConfig,
    ) -> Self {
        Self {
            backend,
            dispatcher,
            scheme,
            formatter,
            config,
        }
    }

    /// Track `session` on a background task.
    ///
    /// The task is detached from the caller; the handle is only needed by
    /// callers that want to observe the outcome.
    pub fn spawn(&self, session: QuerySession) -> JoinHandle<TrackingOutcome> {
        let tracker = self.clone();
        let span = tracing::info_span!("track_progress", job_id = %session.job_id);
        tokio::spawn(async move { tracker.track(&session).await }.instrument(span))
    }

    /// Poll until the job reaches a terminal state.
    pub async fn track(&self, session: &QuerySession) -> TrackingOutcome {
        let plan = TrackingPlan::for_query_type(session.parameters.query_type);
        let started = Instant::now();
        let mut last = QueryProgress::Queued;
        let mut reported = Reported::default();
        let mut consecutive_failures = 0u32;

        tracing::info!(
            job_id = %session.job_id,
            channel = %session.chat.channel,
            "Started progress tracking"
        );

        loop {
            match self.backend.get_summary(&session.job_id).await {
                Ok(summary) => {
                    consecutive_failures = 0;
                    match self.scheme.decode(summary.progress) {
                        None => {
                            let err = DomainError::UnknownProgress(summary.progress);
                            tracing::warn!(job_id = %session.job_id, error = %err, "Skipping poll");
                        }
                        Some(QueryProgress::Failed) => {
                            tracing::info!(job_id = %session.job_id, "Backend reported job failure");
                            self.notify(session, message_formatter::GENERIC_FAILURE).await;
                            return TrackingOutcome::Failed;
                        }
                        Some(observed) => {
                            for stage in self.scheme.stages_between(last, observed) {
                                self.handle_stage(plan, stage, session, &mut reported).await;
                            }
                            if self.scheme.is_after(observed, last) {
                                last = observed;
                            }
                            if observed == QueryProgress::Finished {
                                tracing::info!(job_id = %session.job_id, "Job finished");
                                return TrackingOutcome::Finished;
                            }
                        }
                    }
                }
                Err(err) => {
                    consecutive_failures += 1;
                    tracing::warn!(
                        job_id = %session.job_id,
                        error = %err,
                        consecutive_failures,
                        "Progress poll failed"
                    );
                    if consecutive_failures >= self.config.max_consecutive_failures {
                        tracing::error!(job_id = %session.job_id, "Abandoning progress tracking");
                        self.notify(session, message_formatter::GENERIC_FAILURE).await;
                        return TrackingOutcome::Abandoned;
                    }
                }
            }

            if let Some(max_duration) = self.config.max_duration {
                if started.elapsed() >= max_duration {
                    tracing::warn!(
                        job_id = %session.job_id,
                        last_stage = %last,
                        "Tracking deadline exceeded"
                    );
                    let text = self.formatter.tracking_timed_out(&session.job_id);
                    self.notify(session, &text).await;
                    return TrackingOutcome::TimedOut;
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn handle_stage(
        &self,
        plan: TrackingPlan,
        stage: QueryProgress,
        session: &QuerySession,
        reported: &mut Reported,
    ) {
        tracing::debug!(job_id = %session.job_id, stage = %stage, "Progress stage reached");

        let result = match stage {
            QueryProgress::DataRetrieval if plan.trends => {
                self.notify(session, message_formatter::RETRIEVING_PUBLICATIONS)
                    .await;
                Ok(())
            }
            QueryProgress::AnalysingTrends if plan.trends => {
                self.report_publication_count(session).await
            }
            QueryProgress::CitationRetrieval if plan.trends => self.report_trends(session).await,
            QueryProgress::ClusteringTopics if plan.trends && plan.citations => {
                self.report_citations(session, reported).await;
                // The link follows the list; if the list is retried at
                // `finished`, so is the link.
                if reported.citations {
                    self.report_results_link(session, reported).await;
                }
                Ok(())
            }
            QueryProgress::Finished => {
                if plan.citations && !reported.citations {
                    self.report_citations(session, reported).await;
                }
                if plan.trends {
                    self.report_results_link(session, reported).await;
                }
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            tracing::warn!(
                job_id = %session.job_id,
                stage = %stage,
                error = %err,
                "Stage handler failed"
            );
        }
    }

    async fn report_publication_count(&self, session: &QuerySession) -> DomainResult<()> {
        let entry = self.backend.get_query(&session.job_id).await?;
        let count = entry
            .search_results()
            .ok_or_else(|| missing(session, "search"))?
            .publication_count();
        self.notify(session, &message_formatter::publications_found(count))
            .await;
        Ok(())
    }

    async fn report_trends(&self, session: &QuerySession) -> DomainResult<()> {
        let entry = self.backend.get_query(&session.job_id).await?;
        let trends = entry
            .trend_results()
            .ok_or_else(|| missing(session, "trend"))?;
        let text = self.formatter.trend_summary(&session.job_id, trends);
        self.notify(session, &text).await;
        Ok(())
    }

    /// Send the publication list. Marked as reported only once delivered to
    /// the dispatcher, so a failure at clustering is retried at `finished`.
    /// An empty list sends only the "nothing found" note, without the header.
    async fn report_citations(&self, session: &QuerySession, reported: &mut Reported) {
        let publications = match self.backend.get_query(&session.job_id).await {
            Ok(entry) => match entry.citation_results() {
                Some(results) => results.publications.clone(),
                None => {
                    let err = missing(session, "citation");
                    tracing::warn!(
                        job_id = %session.job_id,
                        error = %err,
                        "Citation results not available yet"
                    );
                    return;
                }
            },
            Err(err) => {
                tracing::warn!(
                    job_id = %session.job_id,
                    error = %err,
                    "Failed to fetch citation results"
                );
                return;
            }
        };

        if !publications.is_empty() {
            self.notify(session, message_formatter::CITATIONS_HEADER).await;
        }
        self.notify(session, &message_formatter::citation_list(&publications))
            .await;
        reported.citations = true;
    }

    async fn report_results_link(&self, session: &QuerySession, reported: &mut Reported) {
        if reported.results_link {
            return;
        }
        let text = self.formatter.results_link(&session.job_id);
        self.notify(session, &text).await;
        reported.results_link = true;
    }

    /// Deliver a message; delivery failures are logged and otherwise ignored.
    async fn notify(&self, session: &QuerySession, text: &str) {
        if let Err(err) = self.dispatcher.send_message(&session.chat, text).await {
            tracing::warn!(
                job_id = %session.job_id,
                bot = %session.chat.bot_name,
                error = %err,
                "Failed to deliver chat message"
            );
        }
    }
}

fn missing(session: &QuerySession, section: &'static str) -> DomainError {
    DomainError::MissingResults {
        job_id: session.job_id.clone(),
        section,
    }
}
