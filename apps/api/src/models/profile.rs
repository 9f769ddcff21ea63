use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per authenticated user, keyed by `user_id` (the auth user id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub education_level: Option<String>,
    pub current_field: Option<String>,
    pub location: Option<String>,
    pub goals: Option<Vec<String>>,
    pub onboarding_completed: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// An empty profile for a user who has never saved one.
    pub fn blank(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            full_name: None,
            bio: None,
            avatar_url: None,
            education_level: None,
            current_field: None,
            location: None,
            goals: None,
            onboarding_completed: None,
            created_at: now,
            updated_at: now,
        }
    }
}
