use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::pipeline::ViewOptions;
use crate::models::domain::{MatchRecord, SortKey};
use crate::models::lenient;

/// Query string for the filtered match list
///
/// GET /api/v1/vacancies/{id}/matches?minScore=60&maxScore=100&skills=sql,python&sortBy=skills&limit=10
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchViewQuery {
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_score: Option<f64>,
    /// Comma separated skill names
    pub skills: Option<String>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
}

impl MatchViewQuery {
    pub fn into_options(self) -> ViewOptions {
        let defaults = ViewOptions::default();
        ViewOptions {
            min_score: self.min_score.unwrap_or(defaults.min_score),
            max_score: self.max_score.unwrap_or(defaults.max_score),
            skills: self
                .skills
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortKey::parse)
                .unwrap_or_default(),
            limit: self.limit,
        }
    }
}

/// Query string for the insights endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InsightsQuery {
    #[validate(range(min = 1, max = 100))]
    pub top: Option<usize>,
}

/// Request to compare candidates side by side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[validate(length(min = 1, max = 10))]
    #[serde(alias = "candidate_ids")]
    pub candidate_ids: Vec<String>,
}

/// Stateless aggregation over records supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub options: ViewOptions,
}
