//! LLM-ranked career recommendations, stored as user/career matches.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::prompts::RECOMMENDATION_PROMPT_TEMPLATE;
use crate::assessment::scoring::TraitScores;
use crate::llm_client::prompts::CAREER_COUNSELOR_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::career::CareerPathRow;

const TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub career_title: String,
    /// 0–100.
    pub match_score: f64,
    pub reasoning: String,
    #[serde(default)]
    pub roadmap: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendationEnvelope {
    recommendations: Vec<CareerRecommendation>,
}

/// A recommendation resolved to a stored career path, ready to upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerMatch {
    pub career_path_id: Uuid,
    /// 0–1.
    pub match_score: f64,
    pub reasoning: String,
}

/// Asks the LLM for the top careers; uses the trait-based ranking when no
/// client is configured or the call fails.
pub async fn recommend_careers(
    llm: Option<&LlmClient>,
    answers: &Map<String, Value>,
    scores: &TraitScores,
    careers: &[CareerPathRow],
) -> Vec<CareerRecommendation> {
    let Some(llm) = llm else {
        info!("No LLM key configured, ranking careers locally");
        return fallback_recommendations(scores, careers);
    };

    let prompt = build_prompt(answers, careers);
    match llm
        .call_json::<RecommendationEnvelope>(&prompt, CAREER_COUNSELOR_SYSTEM)
        .await
    {
        Ok(envelope) if !envelope.recommendations.is_empty() => envelope.recommendations,
        Ok(_) => {
            warn!("LLM returned no recommendations, ranking careers locally");
            fallback_recommendations(scores, careers)
        }
        Err(e) => {
            warn!("LLM recommendation failed, ranking careers locally: {e}");
            fallback_recommendations(scores, careers)
        }
    }
}

fn build_prompt(answers: &Map<String, Value>, careers: &[CareerPathRow]) -> String {
    let answer_lines = answers
        .iter()
        .map(|(question_id, answer)| match answer {
            Value::String(s) => format!("Q{question_id}: {s}"),
            other => format!("Q{question_id}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let career_lines = careers
        .iter()
        .enumerate()
        .map(|(i, career)| {
            format!(
                "{}. {} ({})\n   Description: {}\n   Skills: {}",
                i + 1,
                career.title,
                career.category,
                career.description.as_deref().unwrap_or(""),
                career
                    .required_skills
                    .as_deref()
                    .unwrap_or_default()
                    .join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{answers}", &answer_lines)
        .replace("{careers}", &career_lines)
}

/// Ranks careers by how closely their category fits the user's strongest traits.
///
/// A career in a category of the top trait scores 95, the second trait 85,
/// the third 75, anything else 60. Equal scores are ordered by title.
pub fn fallback_recommendations(
    scores: &TraitScores,
    careers: &[CareerPathRow],
) -> Vec<CareerRecommendation> {
    let ranked = scores.ranked();

    let mut scored: Vec<(u32, &CareerPathRow, Option<&str>)> = careers
        .iter()
        .map(|career| {
            let hit = ranked.iter().take(3).enumerate().find(|(_, (t, _))| {
                t.career_categories()
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(&career.category))
            });
            match hit {
                Some((rank, (t, _))) => (95 - 10 * rank as u32, career, Some(t.as_str())),
                None => (60, career, None),
            }
        })
        .collect();
    scored.sort_by_key(|(score, career, _)| (Reverse(*score), career.title.clone()));

    scored
        .into_iter()
        .take(TOP_N)
        .map(|(score, career, trait_label)| CareerRecommendation {
            career_title: career.title.clone(),
            match_score: f64::from(score),
            reasoning: match trait_label {
                Some(label) => format!(
                    "Based on your interests, you show a strong {label} streak. {} is a {} career that puts that to work every day.",
                    career.title, career.category
                ),
                None => format!(
                    "Based on your interests, {} could broaden your options in {}.",
                    career.title, career.category
                ),
            },
            roadmap: fallback_roadmap_steps(career),
        })
        .collect()
}

fn fallback_roadmap_steps(career: &CareerPathRow) -> Vec<String> {
    let mut steps: Vec<String> = career
        .required_skills
        .as_deref()
        .unwrap_or_default()
        .iter()
        .take(2)
        .map(|skill| format!("Learn {skill}"))
        .collect();
    steps.push(format!("Build a portfolio project related to {}", career.title));
    steps.push("Earn a relevant certification".to_string());
    steps.push(format!("Network with working {} professionals", career.title));
    steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| format!("Step {}: {step}", i + 1))
        .collect()
}

/// Resolves recommendations to career paths by case-insensitive title.
/// Recommendations naming an unknown career are dropped.
pub fn match_to_careers(
    recommendations: &[CareerRecommendation],
    careers: &[CareerPathRow],
) -> Vec<CareerMatch> {
    recommendations
        .iter()
        .filter_map(|rec| {
            careers
                .iter()
                .find(|c| c.title.to_lowercase() == rec.career_title.to_lowercase())
                .map(|career| CareerMatch {
                    career_path_id: career.id,
                    match_score: (rec.match_score / 100.0).clamp(0.0, 1.0),
                    reasoning: rec.reasoning.clone(),
                })
        })
        .collect()
}

/// Upserts matches; one row per (user, career path).
pub async fn store_matches(
    pool: &PgPool,
    user_id: Uuid,
    matches: &[CareerMatch],
) -> Result<(), sqlx::Error> {
    for m in matches {
        sqlx::query(
            r#"
            INSERT INTO user_career_matches (user_id, career_path_id, match_score, reasoning)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, career_path_id)
            DO UPDATE SET match_score = EXCLUDED.match_score, reasoning = EXCLUDED.reasoning
            "#,
        )
        .bind(user_id)
        .bind(m.career_path_id)
        .bind(m.match_score)
        .bind(&m.reasoning)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::scoring::FormattedAnswer;
    use chrono::Utc;

    fn career(title: &str, category: &str) -> CareerPathRow {
        CareerPathRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category: category.to_string(),
            description: None,
            average_salary_min: None,
            average_salary_max: None,
            required_skills: Some(vec!["Python".into(), "SQL".into(), "Statistics".into()]),
            education_requirements: None,
            growth_outlook: None,
            job_market_data: None,
            roadmap: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn scores(pairs: &[(&str, i64)]) -> TraitScores {
        let answers: Vec<FormattedAnswer> = pairs
            .iter()
            .map(|(c, v)| FormattedAnswer {
                category: c.to_string(),
                value: *v,
            })
            .collect();
        TraitScores::from_answers(&answers)
    }

    #[test]
    fn test_fallback_prefers_dominant_trait_category() {
        let careers = vec![
            career("Graphic Designer", "arts"),
            career("Financial Analyst", "finance"),
            career("Registered Nurse", "healthcare"),
            career("Mechanical Engineer", "engineering"),
        ];
        let recs = fallback_recommendations(
            &scores(&[("Artistic", 20), ("Social", 15), ("Realistic", 10)]),
            &careers,
        );

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].career_title, "Graphic Designer");
        assert_eq!(recs[0].match_score, 95.0);
        assert_eq!(recs[1].career_title, "Registered Nurse");
        assert_eq!(recs[1].match_score, 85.0);
        assert_eq!(recs[2].career_title, "Mechanical Engineer");
        assert!(recs[0].reasoning.starts_with("Based on your interests"));
    }

    #[test]
    fn test_fallback_roadmap_is_numbered() {
        let recs = fallback_recommendations(&scores(&[("Investigative", 10)]), &[career("Data Scientist", "science")]);
        let roadmap = &recs[0].roadmap;
        assert_eq!(roadmap[0], "Step 1: Learn Python");
        assert_eq!(roadmap.len(), 5);
        assert!(roadmap[4].starts_with("Step 5:"));
    }

    #[test]
    fn test_fallback_with_no_careers_is_empty() {
        assert!(fallback_recommendations(&scores(&[("Social", 5)]), &[]).is_empty());
    }

    #[test]
    fn test_match_to_careers_is_case_insensitive_and_drops_unknown() {
        let careers = vec![career("Data Scientist", "science")];
        let recs = vec![
            CareerRecommendation {
                career_title: "data scientist".into(),
                match_score: 92.0,
                reasoning: "Based on your interests...".into(),
                roadmap: vec![],
            },
            CareerRecommendation {
                career_title: "Astronaut".into(),
                match_score: 80.0,
                reasoning: "...".into(),
                roadmap: vec![],
            },
        ];
        let matches = match_to_careers(&recs, &careers);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].career_path_id, careers[0].id);
        assert!((matches[0].match_score - 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_llm_envelope_accepts_integer_scores() {
        let envelope: RecommendationEnvelope = serde_json::from_str(
            r#"{"recommendations":[{"careerTitle":"QA Engineer","matchScore":88,"reasoning":"r","roadmap":["Step 1"]}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.recommendations[0].match_score, 88.0);
    }

    #[test]
    fn test_prompt_lists_answers_and_careers() {
        let answers = serde_json::json!({ "7": "5" });
        let prompt = build_prompt(
            answers.as_object().unwrap(),
            &[career("Data Scientist", "science")],
        );
        assert!(prompt.contains("Q7: 5"));
        assert!(prompt.contains("1. Data Scientist (science)"));
        assert!(prompt.contains("Skills: Python, SQL, Statistics"));
    }

    #[tokio::test]
    async fn test_recommend_without_llm_uses_fallback() {
        let careers = vec![career("Startup Founder", "business")];
        let recs = recommend_careers(
            None,
            &Map::new(),
            &scores(&[("Enterprising", 9)]),
            &careers,
        )
        .await;
        assert_eq!(recs[0].career_title, "Startup Founder");
    }
}
