//! Query request models sent to the analysis backend.

use serde::{Deserialize, Serialize};

use super::config::QueryDefaults;

/// Kind of analysis job requested from the backend.
///
/// Encoded as an integer on the wire. `Complete` is the bitwise union of
/// the two individual job kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum QueryType {
    /// Citation recommendation only.
    CitationRecommendation,
    /// Trend analysis only.
    TrendAnalysis,
    /// Trend analysis followed by citation recommendation.
    Complete,
}

impl QueryType {
    const CITATION_BIT: u8 = 1;
    const TREND_BIT: u8 = 2;

    /// Wire code of this query type.
    pub const fn code(self) -> u8 {
        match self {
            Self::CitationRecommendation => Self::CITATION_BIT,
            Self::TrendAnalysis => Self::TREND_BIT,
            Self::Complete => Self::CITATION_BIT | Self::TREND_BIT,
        }
    }

    /// Whether the job produces trend results.
    pub const fn includes_trends(self) -> bool {
        self.code() & Self::TREND_BIT != 0
    }

    /// Whether the job produces citation recommendations.
    pub const fn includes_citations(self) -> bool {
        self.code() & Self::CITATION_BIT != 0
    }
}

impl From<QueryType> for u8 {
    fn from(value: QueryType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for QueryType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::CitationRecommendation),
            2 => Ok(Self::TrendAnalysis),
            3 => Ok(Self::Complete),
            other => Err(format!("invalid query type code: {other}")),
        }
    }
}

/// Parameters of an analysis job.
///
/// Immutable once submitted. A repeat request derives a new instance with
/// [`QueryRequest::with_overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query_type: QueryType,
    pub topics: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
    pub distance: f64,
    pub min_citations: u32,
}

impl QueryRequest {
    /// Build a request of the given type from configured defaults.
    pub fn from_defaults(query_type: QueryType, defaults: &QueryDefaults) -> Self {
        Self {
            query_type,
            topics: Vec::new(),
            start_year: defaults.start_year,
            end_year: defaults.end_year,
            distance: defaults.distance,
            min_citations: defaults.min_citations,
        }
    }

    /// Derive a new request, replacing only the fields set in `overrides`.
    #[must_use]
    pub fn with_overrides(&self, overrides: &QueryOverrides) -> Self {
        Self {
            query_type: self.query_type,
            topics: overrides
                .topics
                .clone()
                .unwrap_or_else(|| self.topics.clone()),
            start_year: overrides.start_year.unwrap_or(self.start_year),
            end_year: overrides.end_year.unwrap_or(self.end_year),
            distance: overrides.distance.unwrap_or(self.distance),
            min_citations: overrides.min_citations.unwrap_or(self.min_citations),
        }
    }
}

/// Fields extracted from an intent payload. `None` means "not mentioned".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOverrides {
    pub topics: Option<Vec<String>>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub distance: Option<f64>,
    pub min_citations: Option<u32>,
}

impl QueryOverrides {
    /// True when the payload mentioned no parameter at all.
    pub const fn is_empty(&self) -> bool {
        self.topics.is_none()
            && self.start_year.is_none()
            && self.end_year.is_none()
            && self.distance.is_none()
            && self.min_citations.is_none()
    }
}
