// Core aggregation exports
pub mod analytics;
pub mod comparison;
pub mod coverage;
pub mod filters;
pub mod insights;
pub mod pipeline;
pub mod ranking;
pub mod skills;

pub use analytics::{quality_distribution, QualityDistribution};
pub use comparison::{compare_candidates, skill_breakdown, Comparison, DimensionLeader, SkillBreakdown};
pub use coverage::{classify_match_quality, classify_skill_coverage, compute_skill_coverage};
pub use filters::{filter_by_score_range, filter_by_skills};
pub use insights::{build_insight_summary, leaderboard_insights};
pub use pipeline::{MatchPipeline, MatchView, ViewOptions};
pub use ranking::{sort_matches, top_n};
pub use skills::{parse_skill, skill_matches, strip_annotation};
