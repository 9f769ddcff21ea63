use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::models::profile::ProfileRow;
use crate::state::AppState;
use crate::users::profile::{fetch_profile, upsert_profile, ProfileUpdate};

/// Either the stored profile or a stub for users who have not saved one yet.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Stored(ProfileRow),
    Pending {
        id: Uuid,
        email: Option<String>,
        message: &'static str,
    },
}

/// GET /api/users/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let response = match fetch_profile(&state.db, user.id).await? {
        Some(profile) => ProfileResponse::Stored(profile),
        None => ProfileResponse::Pending {
            id: user.id,
            email: user.email,
            message: "Profile not detailed yet",
        },
    };
    Ok(Json(response))
}

/// PUT /api/users/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(update): AppJson<ProfileUpdate>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = upsert_profile(&state.db, user.id, update).await?;
    Ok(Json(profile))
}
