//! Career path browsing and the caller's stored matches.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::career::{CareerMatchRow, CareerPathRow};
use crate::state::AppState;

/// Column list for `CareerPathRow`; the category enum is read back as text.
pub const CAREER_PATH_COLUMNS: &str = "id, title, category::text AS category, description, \
    average_salary_min, average_salary_max, required_skills, education_requirements, \
    growth_outlook, job_market_data, roadmap, created_at, updated_at";

const DASHBOARD_MATCH_LIMIT: i64 = 3;

/// GET /api/careers (public)
pub async fn handle_list_careers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CareerPathRow>>, AppError> {
    let careers = sqlx::query_as::<_, CareerPathRow>(&format!(
        "SELECT {CAREER_PATH_COLUMNS} FROM career_paths ORDER BY title"
    ))
    .fetch_all(&state.db)
    .await?;
    Ok(Json(careers))
}

/// GET /api/careers/:id (public)
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerPathRow>, AppError> {
    let career = sqlx::query_as::<_, CareerPathRow>(&format!(
        "SELECT {CAREER_PATH_COLUMNS} FROM career_paths WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Career path {id} not found")))?;
    Ok(Json(career))
}

/// GET /api/careers/matches
///
/// The caller's best matches, highest score first.
pub async fn handle_get_matches(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CareerMatchRow>>, AppError> {
    let matches = sqlx::query_as::<_, CareerMatchRow>(
        r#"
        SELECT m.id, m.match_score, m.reasoning, m.career_path_id,
               c.title, c.description, c.category::text AS category,
               c.average_salary_min, c.average_salary_max, c.growth_outlook
        FROM user_career_matches m
        JOIN career_paths c ON c.id = m.career_path_id
        WHERE m.user_id = $1
        ORDER BY m.match_score DESC
        LIMIT $2
        "#,
    )
    .bind(user.id)
    .bind(DASHBOARD_MATCH_LIMIT)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(matches))
}
