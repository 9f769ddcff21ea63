use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A mentor row flattened with the joined profile columns.
#[derive(Debug, Clone, FromRow)]
pub struct MentorListingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub experience_years: Option<i32>,
    pub expertise_areas: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub total_sessions: Option<i32>,
    pub available_slots: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profile_full_name: Option<String>,
    pub profile_bio: Option<String>,
    pub profile_avatar_url: Option<String>,
    pub has_profile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfileSummary {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub experience_years: Option<i32>,
    pub expertise_areas: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub total_sessions: Option<i32>,
    pub available_slots: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profile: Option<MentorProfileSummary>,
}

impl From<MentorListingRow> for Mentor {
    fn from(row: MentorListingRow) -> Self {
        let profile = row.has_profile.then(|| MentorProfileSummary {
            full_name: row.profile_full_name,
            bio: row.profile_bio,
            avatar_url: row.profile_avatar_url,
        });
        Self {
            id: row.id,
            user_id: row.user_id,
            bio: row.bio,
            company: row.company,
            experience_years: row.experience_years,
            expertise_areas: row.expertise_areas,
            hourly_rate: row.hourly_rate,
            rating: row.rating,
            total_sessions: row.total_sessions,
            available_slots: row.available_slots,
            created_at: row.created_at,
            updated_at: row.updated_at,
            profile,
        }
    }
}
