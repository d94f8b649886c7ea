// Service exports
pub mod backend;
pub mod cache;

pub use backend::{BackendClient, BackendError};
pub use cache::{CacheKey, CacheStats, MatchCache, VacancySnapshot};
