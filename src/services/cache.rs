use crate::core::pipeline::{MatchView, ViewOptions};
use crate::models::{MatchRecord, VacancyRequirement};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// One fetched result set together with the vacancy it was scored against
#[derive(Debug, Clone, PartialEq)]
pub struct VacancySnapshot {
    pub requirement: VacancyRequirement,
    pub records: Vec<MatchRecord>,
}

/// Cached value stamped with the vacancy generation it was built from
#[derive(Clone)]
struct Stamped<T> {
    generation: u64,
    value: Arc<T>,
}

/// Memoization layer for fetched match sets and derived views
///
/// Entries are keyed by vacancy and by the credential the backend accepted
/// for them, so a cached result is only served to callers presenting that
/// same credential. Views are further keyed by their options.
///
/// Every vacancy carries a generation that refreshing bumps. Entries stamped
/// with an older generation are never served, so a fetch that was in flight
/// during a refresh cannot resurrect the old result set.
#[derive(Clone)]
pub struct MatchCache {
    snapshots: moka::future::Cache<String, Stamped<VacancySnapshot>>,
    views: moka::future::Cache<String, Stamped<MatchView>>,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl MatchCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs.max(1));

        let snapshots = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(ttl)
            .build();
        let views = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(ttl)
            .build();

        Self {
            snapshots,
            views,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Current generation of a vacancy; `0` until it is first refreshed.
    pub fn generation(&self, vacancy_id: &str) -> u64 {
        let generations = self.generations.lock().unwrap_or_else(PoisonError::into_inner);
        generations.get(vacancy_id).copied().unwrap_or(0)
    }

    pub async fn snapshot(&self, vacancy_id: &str, scope: &str) -> Option<Arc<VacancySnapshot>> {
        let key = CacheKey::snapshot(vacancy_id, scope);
        let entry = self.snapshots.get(&key).await?;
        if entry.generation != self.generation(vacancy_id) {
            self.snapshots.invalidate(&key).await;
            return None;
        }
        tracing::trace!("Snapshot cache hit: {}", vacancy_id);
        Some(entry.value)
    }

    /// Cached snapshot, or the result of `init` on a miss.
    ///
    /// Concurrent misses for the same vacancy and scope share one `init`.
    /// A result loaded across a refresh is returned to its caller but is
    /// stamped with the old generation, so later reads ignore it.
    pub async fn load_snapshot<F, E>(
        &self,
        vacancy_id: &str,
        scope: &str,
        init: F,
    ) -> Result<Arc<VacancySnapshot>, Arc<E>>
    where
        F: Future<Output = Result<VacancySnapshot, E>>,
        E: Send + Sync + 'static,
    {
        if let Some(snapshot) = self.snapshot(vacancy_id, scope).await {
            return Ok(snapshot);
        }

        let generation = self.generation(vacancy_id);
        let entry = self
            .snapshots
            .try_get_with(CacheKey::snapshot(vacancy_id, scope), async move {
                let snapshot = init.await?;
                Ok(Stamped {
                    generation,
                    value: Arc::new(snapshot),
                })
            })
            .await?;

        Ok(entry.value)
    }

    /// Store a snapshot under the current generation
    pub async fn store_snapshot(
        &self,
        vacancy_id: &str,
        scope: &str,
        snapshot: VacancySnapshot,
    ) -> Arc<VacancySnapshot> {
        let entry = Stamped {
            generation: self.generation(vacancy_id),
            value: Arc::new(snapshot),
        };
        let snapshot = entry.value.clone();
        self.snapshots
            .insert(CacheKey::snapshot(vacancy_id, scope), entry)
            .await;
        snapshot
    }

    pub async fn view(&self, vacancy_id: &str, scope: &str, options: &ViewOptions) -> Option<Arc<MatchView>> {
        let key = CacheKey::view(vacancy_id, scope, options);
        let entry = self.views.get(&key).await?;
        if entry.generation != self.generation(vacancy_id) {
            self.views.invalidate(&key).await;
            return None;
        }
        tracing::trace!("View cache hit: {}", key);
        Some(entry.value)
    }

    /// Store a view built from data of `generation`; stale views are returned but not kept.
    pub async fn store_view(
        &self,
        vacancy_id: &str,
        scope: &str,
        options: &ViewOptions,
        generation: u64,
        view: MatchView,
    ) -> Arc<MatchView> {
        let view = Arc::new(view);
        if generation != self.generation(vacancy_id) {
            tracing::debug!("Not caching view of vacancy {} from generation {}", vacancy_id, generation);
            return view;
        }
        self.views
            .insert(
                CacheKey::view(vacancy_id, scope, options),
                Stamped {
                    generation,
                    value: view.clone(),
                },
            )
            .await;
        view
    }

    /// Retire every cached snapshot and view of a vacancy, for all scopes.
    ///
    /// Returns the new generation.
    pub fn invalidate_vacancy(&self, vacancy_id: &str) -> u64 {
        let generation = {
            let mut generations = self.generations.lock().unwrap_or_else(PoisonError::into_inner);
            let generation = generations.entry(vacancy_id.to_string()).or_insert(0);
            *generation += 1;
            *generation
        };

        tracing::debug!(
            "Invalidated cached matches for vacancy {} (generation {})",
            vacancy_id,
            generation
        );
        generation
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            snapshot_entries: self.snapshots.entry_count(),
            view_entries: self.views.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub snapshot_entries: u64,
    pub view_entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Scope for a caller: a fingerprint of the Authorization header it sent.
    ///
    /// Callers without one all reach the backend with the configured service
    /// credential and share the `service` scope.
    pub fn scope(authorization: Option<&str>) -> String {
        match authorization {
            Some(header) => {
                let mut hasher = Sha256::new();
                hasher.update(header.as_bytes());
                let digest: String = hasher
                    .finalize()
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .collect();
                format!("auth-{}", &digest[..32])
            }
            None => "service".to_string(),
        }
    }

    pub fn snapshot(vacancy_id: &str, scope: &str) -> String {
        format!("snapshot:{}|{}", Self::vacancy_part(vacancy_id), scope)
    }

    pub fn view(vacancy_id: &str, scope: &str, options: &ViewOptions) -> String {
        format!(
            "view:{}|{}|{}",
            Self::vacancy_part(vacancy_id),
            scope,
            options.cache_key()
        )
    }

    fn vacancy_part(vacancy_id: &str) -> String {
        // Length-prefixed so ids containing '|' cannot collide
        format!("{}:{}", vacancy_id.len(), vacancy_id)
    }
}
