use crate::models::{MatchRecord, VacancyRequirement};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the portal backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: backend rejected the credentials")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the company vacancy endpoints of the portal backend
///
/// Only three calls are needed:
/// - fetching a vacancy's required skills
/// - triggering a fresh match run
/// - reading the stored matches
pub struct BackendClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl BackendClient {
    pub fn new(
        base_url: String,
        api_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_token: api_token.filter(|t| !t.is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /companies/vacancies/{id}
    pub async fn get_vacancy(
        &self,
        vacancy_id: &str,
        authorization: Option<&str>,
    ) -> Result<VacancyRequirement, BackendError> {
        let url = self.vacancy_url(vacancy_id, "");
        tracing::debug!("Fetching vacancy from: {}", url);

        let request = self.authorize(self.client.get(&url), authorization);
        let json = read_json(request.send().await?, vacancy_id).await?;

        let vacancy = json
            .get("vacancy")
            .filter(|v| v.is_object())
            .ok_or_else(|| BackendError::InvalidResponse("Missing vacancy object".into()))?;

        serde_json::from_value(vacancy.clone())
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse vacancy: {}", e)))
    }

    /// POST /companies/vacancies/{id}/match
    pub async fn run_match(
        &self,
        vacancy_id: &str,
        authorization: Option<&str>,
    ) -> Result<Vec<MatchRecord>, BackendError> {
        let url = self.vacancy_url(vacancy_id, "/match");
        tracing::debug!("Triggering match run: {}", url);

        let request = self.authorize(self.client.post(&url), authorization);
        let json = read_json(request.send().await?, vacancy_id).await?;
        Ok(parse_matches(&json))
    }

    /// GET /companies/vacancies/{id}/matches
    pub async fn get_matches(
        &self,
        vacancy_id: &str,
        authorization: Option<&str>,
    ) -> Result<Vec<MatchRecord>, BackendError> {
        let url = self.vacancy_url(vacancy_id, "/matches");
        tracing::debug!("Fetching matches from: {}", url);

        let request = self.authorize(self.client.get(&url), authorization);
        let json = read_json(request.send().await?, vacancy_id).await?;
        Ok(parse_matches(&json))
    }

    fn vacancy_url(&self, vacancy_id: &str, suffix: &str) -> String {
        format!(
            "{}/companies/vacancies/{}{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(vacancy_id),
            suffix
        )
    }

    /// The caller's Authorization header wins over the configured service token.
    fn authorize(&self, request: RequestBuilder, authorization: Option<&str>) -> RequestBuilder {
        match (authorization, &self.api_token) {
            (Some(header), _) => request.header(reqwest::header::AUTHORIZATION, header),
            (None, Some(token)) => request.bearer_auth(token),
            (None, None) => request,
        }
    }
}

async fn read_json(response: Response, vacancy_id: &str) -> Result<Value, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    match status {
        StatusCode::NOT_FOUND => Err(BackendError::NotFound(format!(
            "Vacancy {} not found",
            vacancy_id
        ))),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Backend call for vacancy {} failed: {} - {}", vacancy_id, status, body);
            Err(BackendError::ApiError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

/// Decode `{ matches: [...] }`; a missing list is empty and non-object entries are dropped.
fn parse_matches(json: &Value) -> Vec<MatchRecord> {
    let Some(items) = json.get("matches").and_then(|m| m.as_array()) else {
        tracing::debug!("Response carried no matches array, treating as empty");
        return Vec::new();
    };

    let records: Vec<MatchRecord> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();

    if records.len() != items.len() {
        tracing::warn!(
            "Dropped {} malformed match entries",
            items.len() - records.len()
        );
    }
    records
}
