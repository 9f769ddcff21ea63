use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizQuestionRow {
    pub id: Uuid,
    pub category: Option<String>,
    pub question: String,
    pub options: Value,
    pub quiz_type: String,
    pub weight: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Just the columns needed to map answers onto trait categories.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionCategoryRow {
    pub id: Uuid,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub scores: Option<Value>,
    pub recommendations: Option<Vec<String>>,
    pub predicted_career: Option<String>,
    pub confidence: Option<f64>,
    pub behavioral_profile: Option<String>,
    pub completed_at: DateTime<Utc>,
}
