//! Axum route handlers for the Assessment API.

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::{error, info};

use crate::assessment::predictor::{predict_or_fallback, Prediction};
use crate::assessment::recommendations::{
    match_to_careers, recommend_careers, store_matches, CareerRecommendation,
};
use crate::assessment::scoring::{format_answers, TraitScores, UNKNOWN_CATEGORY};
use crate::auth::AuthUser;
use crate::careers::handlers::CAREER_PATH_COLUMNS;
use crate::errors::{AppError, AppJson};
use crate::models::career::CareerPathRow;
use crate::models::quiz::{QuestionCategoryRow, QuizQuestionRow, QuizResultRow};
use crate::state::AppState;
use crate::users::profile::mark_onboarding_completed;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Answers keyed by question id; values are 1–5 as strings or numbers.
#[derive(Debug, Deserialize)]
pub struct AnswersRequest {
    pub answers: Option<Map<String, Value>>,
}

impl AnswersRequest {
    fn require_answers(self) -> Result<Map<String, Value>, AppError> {
        self.answers
            .ok_or(AppError::Validation("Answers are required"))
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub recommendations: Vec<CareerRecommendation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/assessment/questions
pub async fn handle_get_questions(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<QuizQuestionRow>>, AppError> {
    let questions = sqlx::query_as::<_, QuizQuestionRow>(
        r#"
        SELECT id, category, question, options, quiz_type::text AS quiz_type, weight, created_at
        FROM quiz_questions
        ORDER BY category
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(questions))
}

/// POST /api/assessment/submit
///
/// Scores the answers per trait, asks the predictor for a career (falling
/// back to the dominant-trait table), and records one history row.
pub async fn handle_submit(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<AnswersRequest>,
) -> Result<Json<Prediction>, AppError> {
    let answers = request.require_answers()?;

    let categories = load_question_categories(&state.db).await?;
    let formatted = format_answers(&answers, &categories);
    let scores = TraitScores::from_answers(&formatted);

    let prediction = predict_or_fallback(state.predictor.as_ref(), &formatted, &scores).await;

    sqlx::query(
        r#"
        INSERT INTO quiz_results
            (user_id, quiz_type, answers, scores, recommendations,
             predicted_career, confidence, behavioral_profile)
        VALUES ($1, 'interests', $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user.id)
    .bind(Value::Object(answers))
    .bind(scores.to_json())
    .bind(prediction.recommended_careers())
    .bind(&prediction.career)
    .bind(prediction.confidence)
    .bind(&prediction.behavioral_profile)
    .execute(&state.db)
    .await?;

    mark_onboarding_completed(&state.db, user.id).await?;

    info!(
        "Recorded assessment for user {}: {} ({:.2})",
        user.id, prediction.career, prediction.confidence
    );
    Ok(Json(prediction))
}

const HISTORY_SQL: &str = r#"
    SELECT id, user_id, answers, scores, recommendations,
           predicted_career, confidence, behavioral_profile, completed_at
    FROM quiz_results
    WHERE user_id = $1
    ORDER BY completed_at DESC
"#;

/// GET /api/assessment/history
///
/// Most recent submission first.
pub async fn handle_get_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<QuizResultRow>>, AppError> {
    let history = sqlx::query_as::<_, QuizResultRow>(HISTORY_SQL)
        .bind(user.id)
        .fetch_all(&state.db)
        .await?;
    Ok(Json(history))
}

/// POST /api/assessment/recommendations
///
/// Ranks career paths for the answers and stores the matches. Match storage
/// failures are logged; the recommendations are still returned.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<AnswersRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let answers = request.require_answers()?;

    let careers = sqlx::query_as::<_, CareerPathRow>(&format!(
        "SELECT {CAREER_PATH_COLUMNS} FROM career_paths ORDER BY title"
    ))
    .fetch_all(&state.db)
    .await?;

    let categories = load_question_categories(&state.db).await?;
    let scores = TraitScores::from_answers(&format_answers(&answers, &categories));

    let recommendations =
        recommend_careers(state.llm.as_ref(), &answers, &scores, &careers).await;

    let matches = match_to_careers(&recommendations, &careers);
    if let Err(e) = store_matches(&state.db, user.id, &matches).await {
        error!("Failed to save career matches for user {}: {e}", user.id);
    }

    Ok(Json(RecommendationsResponse {
        success: true,
        recommendations,
    }))
}

/// Question id → trait category for the whole question bank.
async fn load_question_categories(pool: &PgPool) -> Result<HashMap<String, String>, AppError> {
    let rows = sqlx::query_as::<_, QuestionCategoryRow>("SELECT id, category FROM quiz_questions")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.id.to_string(),
                row.category
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_scoped_to_caller_and_newest_first() {
        assert!(HISTORY_SQL.contains("WHERE user_id = $1"));
        assert!(HISTORY_SQL.trim_end().ends_with("ORDER BY completed_at DESC"));
    }

    #[test]
    fn test_missing_answers_is_validation_error() {
        let request: AnswersRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            request.require_answers(),
            Err(AppError::Validation("Answers are required"))
        ));
    }
}
