use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::cache::PgJobsCache;
use crate::jobs::search::{find_jobs, DEFAULT_DOMAIN, DEFAULT_LOCATION};
use crate::models::job::JobListing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendingJobsQuery {
    pub domain: Option<String>,
    pub location: Option<String>,
}

/// GET /api/jobs/trends?domain=&location=
pub async fn handle_trending_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<TrendingJobsQuery>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let domain = non_blank(params.domain).unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
    let location = non_blank(params.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    let cache = PgJobsCache::new(state.db.clone());
    let jobs = find_jobs(
        &cache,
        state.job_provider.as_deref(),
        &domain,
        &location,
        Utc::now(),
    )
    .await?;
    Ok(Json(jobs))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
