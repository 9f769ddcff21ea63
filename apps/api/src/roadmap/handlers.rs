use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::models::roadmap::RoadmapRow;
use crate::roadmap::generator::generate_roadmap;
use crate::state::AppState;

const ROADMAP_COLUMNS: &str =
    "id, user_id, career_goal, description, steps, status, created_at, updated_at";

#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapRequest {
    pub career_goal: Option<String>,
}

/// GET /api/roadmap
///
/// Responds with `null` when the user has not generated a roadmap yet.
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Option<RoadmapRow>>, AppError> {
    let roadmap = sqlx::query_as::<_, RoadmapRow>(&format!(
        "SELECT {ROADMAP_COLUMNS} FROM roadmaps WHERE user_id = $1"
    ))
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;
    Ok(Json(roadmap))
}

/// POST /api/roadmap/generate
///
/// Replaces the user's roadmap wholesale with a freshly generated one.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<GenerateRoadmapRequest>,
) -> Result<Json<RoadmapRow>, AppError> {
    let career_goal = request
        .career_goal
        .as_deref()
        .map(str::trim)
        .filter(|goal| !goal.is_empty())
        .ok_or(AppError::Validation("Career goal is required"))?;

    let generated = generate_roadmap(state.llm.as_ref(), career_goal).await;
    let steps = serde_json::to_value(&generated.milestones)
        .map_err(|e| AppError::Internal(e.into()))?;

    let roadmap = sqlx::query_as::<_, RoadmapRow>(&format!(
        r#"
        INSERT INTO roadmaps (user_id, career_goal, description, steps, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'active', now(), now())
        ON CONFLICT (user_id) DO UPDATE SET
            career_goal = EXCLUDED.career_goal,
            description = EXCLUDED.description,
            steps = EXCLUDED.steps,
            status = EXCLUDED.status,
            created_at = EXCLUDED.created_at,
            updated_at = EXCLUDED.updated_at
        RETURNING {ROADMAP_COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&generated.career)
    .bind(&generated.description)
    .bind(steps)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(roadmap))
}
