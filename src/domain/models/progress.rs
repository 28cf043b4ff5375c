//! Job progress stages and the versioned scheme that maps them to wire codes.
//!
//! The backend reports progress as a bare integer. Which stage an integer
//! stands for has changed between backend releases, so the mapping lives in
//! a [`ProgressScheme`] that is loaded from configuration rather than being
//! baked into the stage enum.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stage of an analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryProgress {
    Queued,
    DataRetrieval,
    AnalysingTrends,
    GeneratingDescription,
    DiscoveringTopics,
    CitationRetrieval,
    ClusteringTopics,
    TopicsOverTime,
    Finished,
    Failed,
}

impl QueryProgress {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::DataRetrieval => "data_retrieval",
            Self::AnalysingTrends => "analysing_trends",
            Self::GeneratingDescription => "generating_description",
            Self::DiscoveringTopics => "discovering_topics",
            Self::CitationRetrieval => "citation_retrieval",
            Self::ClusteringTopics => "clustering_topics",
            Self::TopicsOverTime => "topics_over_time",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for QueryProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of stages reported by one backend version.
///
/// The wire code of a stage is its 1-based position in the list. Ordering
/// between stages follows list position. `failed` is an out-of-band
/// terminal value and never counts as a stage to pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QueryProgress>", into = "Vec<QueryProgress>")]
pub struct ProgressScheme {
    stages: Vec<QueryProgress>,
}

impl ProgressScheme {
    /// Build a scheme, checking it has both terminal stages and no duplicates.
    pub fn new(stages: Vec<QueryProgress>) -> Result<Self, String> {
        for required in [QueryProgress::Finished, QueryProgress::Failed] {
            if !stages.contains(&required) {
                return Err(format!("progress scheme must contain '{required}'"));
            }
        }
        for (index, stage) in stages.iter().enumerate() {
            if stages[..index].contains(stage) {
                return Err(format!("progress scheme lists '{stage}' more than once"));
            }
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[QueryProgress] {
        &self.stages
    }

    /// Map a wire code to a stage.
    pub fn decode(&self, code: i64) -> Option<QueryProgress> {
        let index = usize::try_from(code).ok()?.checked_sub(1)?;
        self.stages.get(index).copied()
    }

    /// Wire code of a stage, if this scheme knows it.
    pub fn code_of(&self, stage: QueryProgress) -> Option<i64> {
        self.position(stage)
            .and_then(|index| i64::try_from(index + 1).ok())
    }

    fn position(&self, stage: QueryProgress) -> Option<usize> {
        self.stages.iter().position(|s| *s == stage)
    }

    /// True when `stage` comes strictly after `other`.
    ///
    /// A stage missing from the scheme sorts before every listed stage.
    pub fn is_after(&self, stage: QueryProgress, other: QueryProgress) -> bool {
        self.position(stage) > self.position(other)
    }

    /// Stages strictly after `last` and up to and including `observed`, in
    /// scheme order. `failed` is never returned.
    pub fn stages_between(
        &self,
        last: QueryProgress,
        observed: QueryProgress,
    ) -> Vec<QueryProgress> {
        let Some(end) = self.position(observed) else {
            return Vec::new();
        };
        let start = self.position(last).map_or(0, |p| p + 1);
        if start > end {
            return Vec::new();
        }
        self.stages[start..=end]
            .iter()
            .copied()
            .filter(|stage| *stage != QueryProgress::Failed)
            .collect()
    }
}

impl Default for ProgressScheme {
    fn default() -> Self {
        Self {
            stages: vec![
                QueryProgress::Queued,
                QueryProgress::DataRetrieval,
                QueryProgress::AnalysingTrends,
                QueryProgress::GeneratingDescription,
                QueryProgress::CitationRetrieval,
                QueryProgress::ClusteringTopics,
                QueryProgress::TopicsOverTime,
                QueryProgress::Finished,
                QueryProgress::Failed,
            ],
        }
    }
}

impl TryFrom<Vec<QueryProgress>> for ProgressScheme {
    type Error = String;

    fn try_from(stages: Vec<QueryProgress>) -> Result<Self, Self::Error> {
        Self::new(stages)
    }
}

impl From<ProgressScheme> for Vec<QueryProgress> {
    fn from(scheme: ProgressScheme) -> Self {
        scheme.stages
    }
}
