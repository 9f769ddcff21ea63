use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job listing as served to clients, whether it came from the cache, a live
/// search, or the mock list. Fields a source cannot fill are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub salary_range: String,
    pub source: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
