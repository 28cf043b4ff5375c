//! User-facing chat texts.
//!
//! Messages are markdown as rendered by the chat platform. Anything that
//! links back to the analysis frontend goes through [`MessageFormatter`],
//! which knows the public base URL.

use crate::domain::models::{Publication, QueryRequest, TrendResults, TrendType};

pub const GENERIC_FAILURE: &str = "Sorry, something went wrong. Please try again later.";
pub const NO_PREVIOUS_QUERY: &str = "Sorry, I can't find a previous query. Please start a new one.";
pub const RETRIEVING_PUBLICATIONS: &str = "Retrieving relevant publications ...";
pub const CITATIONS_HEADER: &str =
    "I found the following publications that might be suitable for your topic:";
pub const NO_CITATIONS: &str = "I could not find any publications matching your topic.";

const ITEM_SEPARATOR: &str = "--------------------------";
const LIST_RULE: &str = "==========================";

/// Acknowledgement for a new trend analysis.
pub fn analysis_started(parameters: &QueryRequest) -> String {
    format!(
        "Okay, I started a trend analysis for you for the following parameters:\n{}\n\nCollecting data, please wait ...",
        parameter_lines(parameters, false)
    )
}

/// Acknowledgement for a repeated query with adjusted parameters.
pub fn repeat_started(parameters: &QueryRequest) -> String {
    let citation_only = !parameters.query_type.includes_trends();
    format!(
        "Okay, I initiated a new {} on the basis of your last one and the adjusted parameters:\n{}\n\nCollecting data, please wait ...",
        if citation_only { "search" } else { "analysis" },
        parameter_lines(parameters, citation_only)
    )
}

/// Acknowledgement for a new citation recommendation search.
pub fn citation_search_started(parameters: &QueryRequest) -> String {
    format!(
        "Okay, I started a search for citation recommendations with the following parameters:\n{}\n\nCollecting data, please wait ...",
        parameter_lines(parameters, true)
    )
}

fn parameter_lines(parameters: &QueryRequest, show_min_citations: bool) -> String {
    let topics = if parameters.topics.is_empty() {
        "any".to_string()
    } else {
        parameters.topics.join(", ")
    };
    let threshold = if show_min_citations {
        format!("\t🔹 Min citations: {}", parameters.min_citations)
    } else {
        format!("\t🔹 Distance: {}", parameters.distance)
    };
    format!(
        "\t🔹 Topics: {topics}\n{threshold}\n\t🔹 Time range: {}-{}",
        parameters.start_year, parameters.end_year
    )
}

pub fn publications_found(count: u64) -> String {
    format!("Data retrieved. I found {count} matching publications. Analysing Trends ...")
}

/// Numbered publication list, or a "nothing found" note when empty.
pub fn citation_list(publications: &[Publication]) -> String {
    if publications.is_empty() {
        return NO_CITATIONS.to_string();
    }

    let mut lines = vec![LIST_RULE.to_string()];
    for (index, publication) in publications.iter().enumerate() {
        let year = publication
            .year
            .map_or_else(|| "n.d.".to_string(), |y| y.to_string());
        lines.push(format!(
            "**{}. {}: \"{}\" ({year})**",
            index + 1,
            author_label(&publication.authors),
            publication.title
        ));
        if let Some(doi) = publication.doi.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("https://doi.org/{doi}"));
        }
        let distance = publication
            .distance
            .map_or_else(|| "n/a".to_string(), |d| format!("{d:.3}"));
        let citations = publication
            .citations
            .map_or_else(|| "unknown".to_string(), |c| c.to_string());
        lines.push(format!("Distance: {distance}, Citations: {citations}"));
        lines.push(ITEM_SEPARATOR.to_string());
    }
    lines.join("\n")
}

fn author_label(authors: &[String]) -> String {
    match authors {
        [] => "Unknown authors".to_string(),
        [only] => only.clone(),
        [first, ..] => format!("{first} et al."),
    }
}

const fn trend_icon(trend_type: TrendType) -> &'static str {
    match trend_type {
        TrendType::Increasing => "📈",
        TrendType::Decreasing => "📉",
        TrendType::None => "➖",
    }
}

/// Builds messages that link to the analysis frontend.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    results_base_url: String,
}

impl MessageFormatter {
    pub fn new(results_base_url: impl Into<String>) -> Self {
        Self {
            results_base_url: results_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn results_url(&self, job_id: &str) -> String {
        format!("{}/results/{}", self.results_base_url, job_id)
    }

    pub fn chart_url(&self, job_id: &str) -> String {
        format!("{}/api/queries/{}/chart", self.results_base_url, job_id)
    }

    pub fn results_link(&self, job_id: &str) -> String {
        format!(
            "For more results and insights into your chosen topic, [look here]({})",
            self.results_url(job_id)
        )
    }

    /// Trend list with description and chart.
    pub fn trend_summary(&self, job_id: &str, trends: &TrendResults) -> String {
        let mut lines = Vec::with_capacity(trends.sub_trends.len() + 3);
        if trends.sub_trends.is_empty() {
            lines.push("I could not detect any distinct trends for your topic.".to_string());
        } else {
            lines.push("Alright, I found the following trends for your topic:".to_string());
            for (index, trend) in trends.sub_trends.iter().enumerate() {
                lines.push(format!(
                    "{}. {} {} trend from {} to {}",
                    index + 1,
                    trend_icon(trend.trend_type),
                    trend.trend_type.as_str(),
                    trend.start,
                    trend.end
                ));
            }
        }
        if let Some(description) = trends.trend_description.as_deref() {
            lines.push(description.to_string());
        }
        lines.push(format!("![Trend chart]({})", self.chart_url(job_id)));
        lines.join("\n")
    }

    pub fn tracking_timed_out(&self, job_id: &str) -> String {
        format!(
            "Sorry, this is taking longer than expected. You can check the results [here]({}) later.",
            self.results_url(job_id)
        )
    }
}
