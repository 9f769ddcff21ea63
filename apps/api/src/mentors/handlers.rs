use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::mentor::{Mentor, MentorListingRow};
use crate::state::AppState;

const MENTOR_SELECT: &str = r#"
    SELECT m.id, m.user_id, m.bio, m.company, m.experience_years, m.expertise_areas,
           m.hourly_rate::float8 AS hourly_rate, m.rating::float8 AS rating,
           m.total_sessions, m.available_slots, m.created_at, m.updated_at,
           p.full_name AS profile_full_name, p.bio AS profile_bio,
           p.avatar_url AS profile_avatar_url, (p.id IS NOT NULL) AS has_profile
    FROM mentors m
    LEFT JOIN profiles p ON p.user_id = m.user_id
"#;

/// GET /api/mentors
///
/// Highest rated first; unrated mentors last.
pub async fn handle_list_mentors(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Mentor>>, AppError> {
    let rows = sqlx::query_as::<_, MentorListingRow>(&format!(
        "{MENTOR_SELECT} ORDER BY m.rating DESC NULLS LAST"
    ))
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows.into_iter().map(Mentor::from).collect()))
}

/// GET /api/mentors/:id
pub async fn handle_get_mentor(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Mentor>, AppError> {
    let row = sqlx::query_as::<_, MentorListingRow>(&format!("{MENTOR_SELECT} WHERE m.id = $1"))
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mentor {id} not found")))?;
    Ok(Json(Mentor::from(row)))
}
