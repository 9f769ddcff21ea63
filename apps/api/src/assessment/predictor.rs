//! Career predictor adapter.
//!
//! The predictor is a separate HTTP service (`POST {base}/predict`) that turns
//! category-tagged answers into a career suggestion. When it cannot be reached
//! the dominant trait is mapped through a fixed table instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::assessment::scoring::{FormattedAnswer, TraitScores};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const FALLBACK_CONFIDENCE: f64 = 0.85;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("predictor returned status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub career: String,
    pub confidence: f64,
    pub behavioral_profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_traits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl Prediction {
    /// Careers to persist with the quiz result: the predictor's list, or the
    /// single predicted career when it gave none.
    pub fn recommended_careers(&self) -> Vec<String> {
        if self.recommendations.is_empty() {
            vec![self.career.clone()]
        } else {
            self.recommendations.clone()
        }
    }
}

#[async_trait]
pub trait CareerPredictor: Send + Sync {
    async fn predict(&self, answers: &[FormattedAnswer]) -> Result<Prediction, PredictorError>;
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    answers: &'a [FormattedAnswer],
}

/// Calls the predictor service over HTTP.
pub struct HttpPredictor {
    client: Client,
    predict_url: String,
}

impl HttpPredictor {
    pub fn new(base_url: &str) -> Result<Self, PredictorError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            predict_url: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl CareerPredictor for HttpPredictor {
    async fn predict(&self, answers: &[FormattedAnswer]) -> Result<Prediction, PredictorError> {
        let response = self
            .client
            .post(&self.predict_url)
            .json(&PredictRequest { answers })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictorError::Status(status.as_u16()));
        }
        Ok(response.json::<Prediction>().await?)
    }
}

/// Asks the predictor, substituting the local fallback on any failure.
pub async fn predict_or_fallback(
    predictor: &dyn CareerPredictor,
    answers: &[FormattedAnswer],
    scores: &TraitScores,
) -> Prediction {
    match predictor.predict(answers).await {
        Ok(prediction) => prediction,
        Err(e) => {
            warn!("Predictor unavailable, using fallback: {e}");
            fallback_prediction(scores)
        }
    }
}

/// Maps the dominant trait to its default career.
pub fn fallback_prediction(scores: &TraitScores) -> Prediction {
    let dominant = scores.dominant();
    Prediction {
        career: dominant.fallback_career().to_string(),
        confidence: FALLBACK_CONFIDENCE,
        behavioral_profile: format!("You are a strong {} type.", dominant.as_str()),
        domain: None,
        top_traits: Vec::new(),
        recommendations: Vec::new(),
    }
}
