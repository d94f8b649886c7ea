use serde::{Deserialize, Serialize};

use crate::core::{
    filters::{filter_by_score_range, filter_by_skills},
    ranking::{sort_matches, top_n},
};
use crate::models::{lenient, MatchRecord, SortKey};

/// Filter and ranking options for one view of a result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
    #[serde(deserialize_with = "lenient::score")]
    pub min_score: f64,
    #[serde(deserialize_with = "lenient::upper_bound")]
    pub max_score: f64,
    #[serde(deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    pub sort_by: SortKey,
    pub limit: Option<usize>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_score: 100.0,
            skills: Vec::new(),
            sort_by: SortKey::Overall,
            limit: None,
        }
    }
}

impl ViewOptions {
    /// Stable key for memoizing views; skill order and case do not matter.
    pub fn cache_key(&self) -> String {
        let mut skills: Vec<String> = self
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        skills.sort();
        skills.dedup();

        format!(
            "{}-{}:{}:{}:{}",
            self.min_score,
            self.max_score,
            skills.join(","),
            self.sort_by.as_str(),
            self.limit.map(|l| l.to_string()).unwrap_or_default()
        )
    }
}

/// One filtered, ranked page of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub matches: Vec<MatchRecord>,
    /// Records before filtering
    pub total: usize,
    /// Records that passed the filters, before the limit
    pub filtered: usize,
    pub sort_by: SortKey,
}

/// Composes the aggregation stages into a single view
///
/// # Stages
/// 1. Score range filter
/// 2. Selected skill filter
/// 3. Stable sort on the requested dimension
/// 4. Limit
#[derive(Debug, Clone, Copy)]
pub struct MatchPipeline {
    default_limit: usize,
    max_limit: usize,
}

impl MatchPipeline {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            default_limit: default_limit.clamp(1, max_limit),
            max_limit,
        }
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit
    }

    /// Effective limit for a requested one
    pub fn limit_for(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }

    pub fn apply(&self, records: &[MatchRecord], options: &ViewOptions) -> MatchView {
        let total = records.len();

        let in_range = filter_by_score_range(records, options.min_score, options.max_score);
        let with_skills = filter_by_skills(&in_range, &options.skills);
        let filtered = with_skills.len();

        let ranked = sort_matches(&with_skills, options.sort_by);
        let matches = top_n(&ranked, self.limit_for(options.limit));

        tracing::trace!(total, filtered, returned = matches.len(), "applied match view");

        MatchView {
            matches,
            total,
            filtered,
            sort_by: options.sort_by,
        }
    }
}

impl Default for MatchPipeline {
    fn default() -> Self {
        Self::new(50, 500)
    }
}
