//! Talent Match - candidate match filtering, ranking and skill-gap aggregation
//!
//! The `core` module holds the pure aggregation functions used by the company
//! dashboards; the rest of the crate serves them over HTTP on top of the
//! portal backend's match records.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    build_insight_summary, classify_match_quality, classify_skill_coverage, compute_skill_coverage,
    filter_by_score_range, filter_by_skills, sort_matches, top_n, MatchPipeline, ViewOptions,
};
pub use models::{CoverageEntry, InsightSummary, MatchRecord, SkillFilterState, SortKey, Tier, VacancyRequirement};
