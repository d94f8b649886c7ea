// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{
    clamp_score, CoverageEntry, ExperienceAnalysis, InsightSummary, MatchRecord, MatchType,
    SkillFilterState, SkillMatch, SortKey, Tier, TopCandidate, VacancyRequirement,
};
pub use requests::{AggregateRequest, CompareRequest, InsightsQuery, MatchViewQuery};
pub use responses::{
    AggregateResponse, CompareResponse, CoverageResponse, CoverageRow, ErrorResponse, HealthResponse,
    InsightsResponse,
};
