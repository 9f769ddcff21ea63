use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerPathRow {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub average_salary_min: Option<i32>,
    pub average_salary_max: Option<i32>,
    pub required_skills: Option<Vec<String>>,
    pub education_requirements: Option<Vec<String>>,
    pub growth_outlook: Option<String>,
    pub job_market_data: Option<Value>,
    pub roadmap: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored match joined with the summary of its career path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerMatchRow {
    pub id: Uuid,
    pub match_score: f64,
    pub reasoning: Option<String>,
    pub career_path_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub average_salary_min: Option<i32>,
    pub average_salary_max: Option<i32>,
    pub growth_outlook: Option<String>,
}
