//! Profile persistence. A profile row is created the first time a user saves
//! anything; later updates merge into it field by field.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::ProfileRow;

const PROFILE_COLUMNS: &str = "id, user_id, full_name, bio, avatar_url, education_level, current_field, \
    location, goals, onboarding_completed, created_at, updated_at";

const MARK_ONBOARDED_SQL: &str = r#"
    INSERT INTO profiles (id, user_id, onboarding_completed, created_at, updated_at)
    VALUES ($1, $2, TRUE, now(), now())
    ON CONFLICT (user_id) DO UPDATE SET onboarding_completed = TRUE, updated_at = now()
"#;

/// Partial profile update. Absent (or null) fields leave the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub education_level: Option<String>,
    pub current_field: Option<String>,
    pub location: Option<String>,
    pub goals: Option<Vec<String>>,
    pub onboarding_completed: Option<bool>,
}

impl ProfileUpdate {
    /// Overlays the provided fields onto `profile` and stamps `updated_at`.
    pub fn apply(self, mut profile: ProfileRow, now: DateTime<Utc>) -> ProfileRow {
        fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        overlay(&mut profile.full_name, self.full_name);
        overlay(&mut profile.bio, self.bio);
        overlay(&mut profile.avatar_url, self.avatar_url);
        overlay(&mut profile.education_level, self.education_level);
        overlay(&mut profile.current_field, self.current_field);
        overlay(&mut profile.location, self.location);
        overlay(&mut profile.goals, self.goals);
        overlay(&mut profile.onboarding_completed, self.onboarding_completed);
        profile.updated_at = now;
        profile
    }
}

pub async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Merges `update` into the stored profile (or a blank one) and writes it back.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<ProfileRow, sqlx::Error> {
    let now = Utc::now();
    let current = fetch_profile(pool, user_id)
        .await?
        .unwrap_or_else(|| ProfileRow::blank(user_id, now));
    let merged = update.apply(current, now);

    sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        INSERT INTO profiles
            (id, user_id, full_name, bio, avatar_url, education_level, current_field,
             location, goals, onboarding_completed, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (user_id) DO UPDATE SET
            full_name = EXCLUDED.full_name,
            bio = EXCLUDED.bio,
            avatar_url = EXCLUDED.avatar_url,
            education_level = EXCLUDED.education_level,
            current_field = EXCLUDED.current_field,
            location = EXCLUDED.location,
            goals = EXCLUDED.goals,
            onboarding_completed = EXCLUDED.onboarding_completed,
            updated_at = EXCLUDED.updated_at
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(merged.id)
    .bind(merged.user_id)
    .bind(&merged.full_name)
    .bind(&merged.bio)
    .bind(&merged.avatar_url)
    .bind(&merged.education_level)
    .bind(&merged.current_field)
    .bind(&merged.location)
    .bind(&merged.goals)
    .bind(merged.onboarding_completed)
    .bind(merged.created_at)
    .bind(merged.updated_at)
    .fetch_one(pool)
    .await
}

/// Flags the user as onboarded, creating the profile row if needed.
pub async fn mark_onboarding_completed(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(MARK_ONBOARDED_SQL)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
