//! Records returned by the analysis backend.
//!
//! Only the parts the adapter reads are modelled strictly; everything else
//! defaults when absent so that backend additions do not break decoding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::query::QueryType;

/// Response of the job creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedQuery {
    /// Backend-issued job identifier.
    pub uuid: String,
}

/// Response of the progress summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySummary {
    #[serde(default)]
    pub uuid: Option<String>,
    /// Raw progress code, decoded with a `ProgressScheme`.
    pub progress: i64,
}

/// Full job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEntry {
    pub uuid: String,
    #[serde(rename = "type", default)]
    pub query_type: Option<QueryType>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub min_citations: Option<u32>,
    #[serde(default)]
    pub results: Option<AnalysisResults>,
}

impl QueryEntry {
    pub fn search_results(&self) -> Option<&SearchResults> {
        self.results.as_ref()?.search_results.as_ref()
    }

    pub fn trend_results(&self) -> Option<&TrendResults> {
        self.results.as_ref()?.trend_results.as_ref()
    }

    pub fn citation_results(&self) -> Option<&CitationRecommendationResults> {
        self.results.as_ref()?.citation_results.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default)]
    pub search_results: Option<SearchResults>,
    #[serde(default)]
    pub trend_results: Option<TrendResults>,
    #[serde(default)]
    pub citation_results: Option<CitationRecommendationResults>,
}

/// Publication counts per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub raw: Vec<f64>,
    #[serde(default)]
    pub adjusted: Vec<f64>,
    #[serde(default)]
    pub pub_types: HashMap<String, u64>,
}

impl SearchResults {
    /// Total number of matching publications across all years.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn publication_count(&self) -> u64 {
        self.raw.iter().sum::<f64>().max(0.0).round() as u64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendResults {
    #[serde(default)]
    pub breakpoints: Vec<i32>,
    #[serde(default)]
    pub global_trend: Option<Trend>,
    #[serde(default)]
    pub sub_trends: Vec<Trend>,
    #[serde(default)]
    pub trend_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub start: i32,
    pub end: i32,
    #[serde(rename = "type")]
    pub trend_type: TrendType,
    #[serde(default)]
    pub slope: f64,
    #[serde(default)]
    pub line: Vec<f64>,
}

/// Direction of a trend segment. Encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TrendType {
    None,
    Increasing,
    Decreasing,
}

impl TrendType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl From<TrendType> for u8 {
    fn from(value: TrendType) -> Self {
        match value {
            TrendType::None => 0,
            TrendType::Increasing => 1,
            TrendType::Decreasing => 2,
        }
    }
}

impl TryFrom<u8> for TrendType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Increasing),
            2 => Ok(Self::Decreasing),
            other => Err(format!("invalid trend type code: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationRecommendationResults {
    #[serde(default)]
    pub publications: Vec<Publication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "type", default)]
    pub publication_type: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub citations: Option<u64>,
}
