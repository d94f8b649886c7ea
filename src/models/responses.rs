use serde::{Deserialize, Serialize};

use crate::core::analytics::QualityDistribution;
use crate::core::comparison::{Comparison, SkillBreakdown};
use crate::core::pipeline::MatchView;
use crate::models::domain::{CoverageEntry, InsightSummary, MatchRecord, Tier};

/// Coverage entry annotated with its bar tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRow {
    pub skill: String,
    pub count: usize,
    pub percentage: u32,
    pub tier: Tier,
}

impl From<CoverageEntry> for CoverageRow {
    fn from(entry: CoverageEntry) -> Self {
        let tier = crate::core::coverage::classify_skill_coverage(entry.percentage as f64);
        Self {
            skill: entry.skill,
            count: entry.count,
            percentage: entry.percentage,
            tier,
        }
    }
}

/// Response for the coverage endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResponse {
    pub vacancy_id: String,
    pub total_candidates: usize,
    pub coverage: Vec<CoverageRow>,
}

/// Response for the insights endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub vacancy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacancy_title: Option<String>,
    pub summary: InsightSummary,
    pub leaderboard: Vec<MatchRecord>,
    pub distribution: QualityDistribution,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the compare endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(flatten)]
    pub comparison: Comparison,
    pub breakdowns: Vec<SkillBreakdown>,
}

/// Response for the stateless aggregate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub view: MatchView,
    pub coverage: Vec<CoverageRow>,
    pub summary: InsightSummary,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
