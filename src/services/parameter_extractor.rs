//! Turns NLU entity maps into typed query parameters.
//!
//! Entities arrive as `{"<name>": {"value": ...}}`. Values may be JSON
//! strings or numbers depending on the NLU pipeline, so every field is
//! parsed leniently and dropped (with a warning) when it does not parse.

use serde_json::{Map, Value};

use crate::domain::models::{QueryDefaults, QueryOverrides, QueryRequest, QueryType};

/// Entity names that may carry the topic list, in lookup order.
pub const TOPIC_ENTITY_KEYS: [&str; 4] = ["topics", "analysis", "citrec", "trends"];

const DISTANCE_KEY: &str = "distance";
const START_YEAR_KEY: &str = "startYear";
const END_YEAR_KEY: &str = "endYear";
const MIN_CITATIONS_KEY: &str = "minCitationCount";

/// Builds [`QueryRequest`]s from intent payloads.
#[derive(Debug, Clone, Default)]
pub struct ParameterExtractor {
    defaults: QueryDefaults,
}

impl ParameterExtractor {
    pub const fn new(defaults: QueryDefaults) -> Self {
        Self { defaults }
    }

    /// Build a fresh request of `query_type` from the entities of a payload.
    ///
    /// Absent or malformed entities yield the configured defaults with no
    /// topic filter.
    pub fn extract(&self, entities: Option<&Value>, query_type: QueryType) -> QueryRequest {
        QueryRequest::from_defaults(query_type, &self.defaults)
            .with_overrides(&Self::overrides(entities))
    }

    /// Collect only the parameters the payload actually mentions.
    pub fn overrides(entities: Option<&Value>) -> QueryOverrides {
        let Some(entities) = entities.and_then(Value::as_object) else {
            return QueryOverrides::default();
        };

        QueryOverrides {
            topics: TOPIC_ENTITY_KEYS
                .iter()
                .find_map(|key| entity_value(entities, key))
                .and_then(topics_from_value),
            start_year: entity_value(entities, START_YEAR_KEY)
                .and_then(|v| parse_integer(START_YEAR_KEY, v)),
            end_year: entity_value(entities, END_YEAR_KEY)
                .and_then(|v| parse_integer(END_YEAR_KEY, v)),
            distance: entity_value(entities, DISTANCE_KEY)
                .and_then(|v| parse_float(DISTANCE_KEY, v)),
            min_citations: entity_value(entities, MIN_CITATIONS_KEY)
                .and_then(|v| parse_integer(MIN_CITATIONS_KEY, v)),
        }
    }
}

/// Split a topic string on commas, keeping commas inside double quotes.
///
/// Quotes are removed, phrases trimmed, and empty phrases dropped:
/// `"AI, robotics","climate change"` gives `["AI, robotics", "climate change"]`.
pub fn parse_topics(raw: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for ch in raw.chars() {
        match ch {
            ',' if !inside_quotes => phrases.push(std::mem::take(&mut current)),
            '"' => inside_quotes = !inside_quotes,
            _ => current.push(ch),
        }
    }
    phrases.push(current);

    phrases
        .into_iter()
        .map(|phrase| phrase.trim().to_string())
        .filter(|phrase| !phrase.is_empty())
        .collect()
}

fn entity_value<'a>(entities: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    entities.get(key)?.get("value").filter(|v| !v.is_null())
}

fn topics_from_value(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(raw) => Some(parse_topics(raw)),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .flat_map(parse_topics)
                .collect(),
        ),
        other => {
            tracing::warn!(value = %other, "Ignoring topics entity with unexpected type");
            None
        }
    }
}

fn parse_float(key: &str, value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(entity = key, value = %value, "Ignoring unparseable entity value");
    }
    parsed
}

fn parse_integer<T: TryFrom<i64>>(key: &str, value: &Value) -> Option<T> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    }
    .and_then(|n| T::try_from(n).ok());

    if parsed.is_none() {
        tracing::warn!(entity = key, value = %value, "Ignoring unparseable entity value");
    }
    parsed
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_topics_keeps_quoted_commas() {
        assert_eq!(
            parse_topics(r#""AI, robotics","climate change""#),
            vec!["AI, robotics".to_string(), "climate change".to_string()]
        );
    }

    #[test]
    fn test_parse_topics_plain_list() {
        assert_eq!(
            parse_topics("deep learning, quantum computing ,  crispr"),
            vec!["deep learning", "quantum computing", "crispr"]
        );
    }

    #[test]
    fn test_parse_topics_drops_empty_phrases() {
        assert_eq!(parse_topics("a,,b,"), vec!["a", "b"]);
        assert!(parse_topics("  ").is_empty());
    }

    #[test]
    fn test_extract_all_fields() {
        let entities = json!({
            "topics": {"value": "\"AI, robotics\",climate change"},
            "distance": {"value": "0.25"},
            "startYear": {"value": "1999"},
            "endYear": {"value": 2015},
            "minCitationCount": {"value": "12"}
        });
        let request =
            ParameterExtractor::default().extract(Some(&entities), QueryType::Complete);

        assert_eq!(request.topics, vec!["AI, robotics", "climate change"]);
        assert!((request.distance - 0.25).abs() < f64::EPSILON);
        assert_eq!(request.start_year, 1999);
        assert_eq!(request.end_year, 2015);
        assert_eq!(request.min_citations, 12);
        assert_eq!(request.query_type, QueryType::Complete);
    }

    #[test]
    fn test_topic_key_precedence() {
        let entities = json!({
            "trends": {"value": "ignored"},
            "analysis": {"value": "used"}
        });
        let overrides = ParameterExtractor::overrides(Some(&entities));
        assert_eq!(overrides.topics, Some(vec!["used".to_string()]));
    }

    #[test]
    fn test_absent_entities_yield_defaults() {
        let request = ParameterExtractor::default().extract(None, QueryType::Complete);
        assert!(request.topics.is_empty());
        assert_eq!(request.start_year, 1980);
        assert_eq!(request.end_year, 2022);
        assert!((request.distance - 0.11).abs() < f64::EPSILON);
        assert_eq!(request.min_citations, 0);
    }

    #[test]
    fn test_malformed_entities_yield_defaults() {
        for entities in [json!("topics"), json!([1, 2]), json!(null), json!({"topics": 3})] {
            let request =
                ParameterExtractor::default().extract(Some(&entities), QueryType::Complete);
            assert!(request.topics.is_empty(), "entities: {entities}");
            assert_eq!(request.start_year, 1980);
        }
    }

    #[test]
    fn test_unparseable_values_are_ignored() {
        let entities = json!({
            "distance": {"value": "far"},
            "startYear": {"value": "nineteen"},
            "minCitationCount": {"value": "-4"}
        });
        let overrides = ParameterExtractor::overrides(Some(&entities));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_whole_float_years_accepted() {
        let entities = json!({"startYear": {"value": 2001.0}, "endYear": {"value": "2010.0"}});
        let overrides = ParameterExtractor::overrides(Some(&entities));
        assert_eq!(overrides.start_year, Some(2001));
        assert_eq!(overrides.end_year, Some(2010));
    }

    #[test]
    fn test_repeat_overlay_keeps_prior_parameters() {
        let prior = ParameterExtractor::default().extract(
            Some(&json!({
                "topics": {"value": "photonics"},
                "startYear": {"value": 2005},
                "minCitationCount": {"value": 3}
            })),
            QueryType::Complete,
        );
        let overrides =
            ParameterExtractor::overrides(Some(&json!({"distance": {"value": 0.3}})));
        let repeated = prior.with_overrides(&overrides);

        assert!((repeated.distance - 0.3).abs() < f64::EPSILON);
        assert_eq!(repeated.topics, vec!["photonics"]);
        assert_eq!(repeated.start_year, 2005);
        assert_eq!(repeated.end_year, 2022);
        assert_eq!(repeated.min_citations, 3);
    }
}
