use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{
    build_insight_summary, compare_candidates, compute_skill_coverage, quality_distribution,
    skill_breakdown, sort_matches, top_n, MatchPipeline,
};
use crate::models::{
    AggregateRequest, AggregateResponse, CompareRequest, CompareResponse, CoverageResponse,
    CoverageRow, ErrorResponse, HealthResponse, InsightsQuery, InsightsResponse, MatchViewQuery,
    SortKey,
};
use crate::services::{BackendClient, BackendError, CacheKey, MatchCache, VacancySnapshot};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: MatchCache,
    pub pipeline: MatchPipeline,
    pub leaderboard_size: usize,
}

/// Configure all vacancy match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/aggregate", web::post().to(aggregate))
        .route("/vacancies/{id}/matches", web::get().to(get_matches))
        .route("/vacancies/{id}/matches/refresh", web::post().to(refresh_matches))
        .route("/vacancies/{id}/coverage", web::get().to(get_coverage))
        .route("/vacancies/{id}/insights", web::get().to(get_insights))
        .route("/vacancies/{id}/compare", web::post().to(compare))
        .route(
            "/vacancies/{id}/candidates/{candidate_id}/skills",
            web::get().to(get_candidate_skills),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.cache.stats();
    tracing::trace!(
        "Health check (cached snapshots: {}, views: {})",
        stats.snapshot_entries,
        stats.view_entries
    );

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Filtered and ranked matches for a vacancy
///
/// GET /api/v1/vacancies/{id}/matches?minScore=60&maxScore=100&skills=sql,python&sortBy=skills&limit=20
async fn get_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchViewQuery>,
    req: HttpRequest,
) -> HttpResponse {
    let vacancy_id = path.into_inner();
    let request_id = Uuid::new_v4();

    if let Err(errors) = query.validate() {
        tracing::info!(%request_id, "Validation failed for matches query: {}", errors);
        return validation_error(errors);
    }
    let options = query.into_inner().into_options();
    let auth = authorization(&req);
    let scope = CacheKey::scope(auth);
    let generation = state.cache.generation(&vacancy_id);

    tracing::info!(
        %request_id,
        "Building match view for vacancy {} (sort: {}, skills: {})",
        vacancy_id,
        options.sort_by.as_str(),
        options.skills.len()
    );

    if let Some(view) = state.cache.view(&vacancy_id, &scope, &options).await {
        tracing::debug!(%request_id, "Serving cached view for vacancy {}", vacancy_id);
        return with_request_id(HttpResponse::Ok(), request_id).json(&*view);
    }

    let snapshot = match load_snapshot(&state, &vacancy_id, auth, &scope).await {
        Ok(snapshot) => snapshot,
        Err(e) => return backend_error(request_id, &vacancy_id, &e),
    };

    let view = state.pipeline.apply(&snapshot.records, &options);
    let view = state
        .cache
        .store_view(&vacancy_id, &scope, &options, generation, view)
        .await;

    tracing::info!(
        %request_id,
        "Returning {} of {} matches for vacancy {}",
        view.matches.len(),
        view.total,
        vacancy_id
    );

    with_request_id(HttpResponse::Ok(), request_id).json(&*view)
}

/// Re-run matching upstream and replace the cached result set
///
/// POST /api/v1/vacancies/{id}/matches/refresh
async fn refresh_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    let vacancy_id = path.into_inner();
    let request_id = Uuid::new_v4();
    let auth = authorization(&req);

    tracing::info!(%request_id, "Refreshing matches for vacancy {}", vacancy_id);

    let fetched = tokio::try_join!(
        state.backend.get_vacancy(&vacancy_id, auth),
        state.backend.run_match(&vacancy_id, auth),
    );
    let (requirement, records) = match fetched {
        Ok(result) => result,
        Err(e) => return backend_error(request_id, &vacancy_id, &e),
    };

    state.cache.invalidate_vacancy(&vacancy_id);
    let snapshot = state
        .cache
        .store_snapshot(&vacancy_id, &CacheKey::scope(auth), VacancySnapshot { requirement, records })
        .await;

    let view = state.pipeline.apply(&snapshot.records, &Default::default());

    tracing::info!(
        %request_id,
        "Refreshed vacancy {}: {} matches",
        vacancy_id,
        snapshot.records.len()
    );

    with_request_id(HttpResponse::Ok(), request_id).json(view)
}

/// Skill coverage across all matches of a vacancy, widest gaps first
///
/// GET /api/v1/vacancies/{id}/coverage
async fn get_coverage(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    let vacancy_id = path.into_inner();
    let request_id = Uuid::new_v4();

    let snapshot = match cached_snapshot(&state, &vacancy_id, &req).await {
        Ok(snapshot) => snapshot,
        Err(e) => return backend_error(request_id, &vacancy_id, &e),
    };

    let coverage = compute_skill_coverage(&snapshot.records, &snapshot.requirement.required_skills)
        .into_iter()
        .map(CoverageRow::from)
        .collect();

    with_request_id(HttpResponse::Ok(), request_id).json(CoverageResponse {
        vacancy_id,
        total_candidates: snapshot.records.len(),
        coverage,
    })
}

/// Leaderboard, summary and quality distribution for a vacancy
///
/// GET /api/v1/vacancies/{id}/insights?top=5
async fn get_insights(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<InsightsQuery>,
    req: HttpRequest,
) -> HttpResponse {
    let vacancy_id = path.into_inner();
    let request_id = Uuid::new_v4();

    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }
    let top = query.top.unwrap_or(state.leaderboard_size);

    let snapshot = match cached_snapshot(&state, &vacancy_id, &req).await {
        Ok(snapshot) => snapshot,
        Err(e) => return backend_error(request_id, &vacancy_id, &e),
    };

    let ranked = sort_matches(&snapshot.records, SortKey::Overall);
    let summary = build_insight_summary(&ranked, &snapshot.requirement.required_skills);

    tracing::info!(
        %request_id,
        "Built insights for vacancy {} over {} candidates",
        vacancy_id,
        summary.total_candidates
    );

    with_request_id(HttpResponse::Ok(), request_id).json(InsightsResponse {
        vacancy_title: snapshot.requirement.title.clone(),
        leaderboard: top_n(&ranked, top),
        distribution: quality_distribution(&ranked),
        summary,
        vacancy_id,
        generated_at: chrono::Utc::now(),
    })
}

/// Compare selected candidates of a vacancy side by side
///
/// POST /api/v1/vacancies/{id}/compare
///
/// Request body:
/// ```json
/// { "candidateIds": ["string"] }
/// ```
async fn compare(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CompareRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let vacancy_id = path.into_inner();
    let request_id = Uuid::new_v4();

    if let Err(errors) = body.validate() {
        return validation_error(errors);
    }

    let snapshot = match cached_snapshot(&state, &vacancy_id, &req).await {
        Ok(snapshot) => snapshot,
        Err(e) => return backend_error(request_id, &vacancy_id, &e),
    };

    let comparison = compare_candidates(&snapshot.records, &body.candidate_ids);
    if !comparison.missing.is_empty() {
        tracing::debug!(
            %request_id,
            "Unknown candidates in comparison for vacancy {}: {:?}",
            vacancy_id,
            comparison.missing
        );
    }
    let breakdowns = comparison.candidates.iter().map(skill_breakdown).collect();

    with_request_id(HttpResponse::Ok(), request_id).json(CompareResponse {
        comparison,
        breakdowns,
    })
}

/// Structured skill breakdown of one candidate
///
/// GET /api/v1/vacancies/{id}/candidates/{candidate_id}/skills
async fn get_candidate_skills(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> HttpResponse {
    let (vacancy_id, candidate_id) = path.into_inner();
    let request_id = Uuid::new_v4();

    let snapshot = match cached_snapshot(&state, &vacancy_id, &req).await {
        Ok(snapshot) => snapshot,
        Err(e) => return backend_error(request_id, &vacancy_id, &e),
    };

    match snapshot.records.iter().find(|r| r.candidate_id == candidate_id) {
        Some(record) => {
            with_request_id(HttpResponse::Ok(), request_id).json(skill_breakdown(record))
        }
        None => with_request_id(HttpResponse::NotFound(), request_id).json(ErrorResponse {
            error: "Candidate not found".to_string(),
            message: format!("No match for candidate {} on vacancy {}", candidate_id, vacancy_id),
            status_code: 404,
        }),
    }
}

/// Stateless aggregation over caller-supplied records
///
/// POST /api/v1/aggregate
///
/// Request body:
/// ```json
/// {
///   "matches": [MatchRecord],
///   "requiredSkills": ["string"],
///   "options": { "minScore": 0, "maxScore": 100, "skills": [], "sortBy": "overall", "limit": 20 }
/// }
/// ```
async fn aggregate(state: web::Data<AppState>, body: web::Json<AggregateRequest>) -> HttpResponse {
    let request = body.into_inner();

    tracing::debug!(
        "Aggregating {} records against {} required skills",
        request.matches.len(),
        request.required_skills.len()
    );

    let view = state.pipeline.apply(&request.matches, &request.options);
    let ranked = sort_matches(&request.matches, SortKey::Overall);
    let summary = build_insight_summary(&ranked, &request.required_skills);
    let coverage = summary
        .skill_coverage
        .iter()
        .cloned()
        .map(CoverageRow::from)
        .collect();

    HttpResponse::Ok().json(AggregateResponse {
        view,
        coverage,
        summary,
    })
}

/// Snapshot for the caller's credential scope, fetching vacancy and stored matches on a miss
async fn cached_snapshot(
    state: &AppState,
    vacancy_id: &str,
    req: &HttpRequest,
) -> Result<Arc<VacancySnapshot>, Arc<BackendError>> {
    let auth = authorization(req);
    load_snapshot(state, vacancy_id, auth, &CacheKey::scope(auth)).await
}

async fn load_snapshot(
    state: &AppState,
    vacancy_id: &str,
    auth: Option<&str>,
    scope: &str,
) -> Result<Arc<VacancySnapshot>, Arc<BackendError>> {
    state
        .cache
        .load_snapshot(vacancy_id, scope, async {
            let (requirement, records) = tokio::try_join!(
                state.backend.get_vacancy(vacancy_id, auth),
                state.backend.get_matches(vacancy_id, auth),
            )?;

            tracing::debug!(
                "Fetched {} matches and {} required skills for vacancy {}",
                records.len(),
                requirement.required_skills.len(),
                vacancy_id
            );

            Ok::<_, BackendError>(VacancySnapshot { requirement, records })
        })
        .await
}

fn authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

fn with_request_id(
    mut builder: actix_web::HttpResponseBuilder,
    request_id: Uuid,
) -> actix_web::HttpResponseBuilder {
    builder.insert_header(("x-request-id", request_id.to_string()));
    builder
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn backend_error(request_id: Uuid, vacancy_id: &str, err: &BackendError) -> HttpResponse {
    let (mut builder, error, status_code) = match err {
        BackendError::NotFound(_) => (HttpResponse::NotFound(), "Vacancy not found", 404),
        BackendError::Unauthorized => (HttpResponse::Unauthorized(), "Unauthorized", 401),
        _ => (HttpResponse::BadGateway(), "Backend request failed", 502),
    };

    if status_code == 502 {
        tracing::error!(%request_id, "Backend failure for vacancy {}: {}", vacancy_id, err);
    } else {
        tracing::warn!(%request_id, "Backend rejected vacancy {}: {}", vacancy_id, err);
    }

    builder
        .insert_header(("x-request-id", request_id.to_string()))
        .json(ErrorResponse {
            error: error.to_string(),
            message: err.to_string(),
            status_code,
        })
}
