use std::sync::Arc;

use sqlx::PgPool;

use crate::assessment::predictor::CareerPredictor;
use crate::auth::JwtVerifier;
use crate::jobs::jsearch::JobSearchProvider;
use crate::llm_client::LlmClient;
use crate::messaging::hub::MessageHub;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt: JwtVerifier,
    /// `None` when no Anthropic key is configured; callers use the rule-based fallbacks.
    pub llm: Option<LlmClient>,
    pub predictor: Arc<dyn CareerPredictor>,
    /// `None` when no RapidAPI key is configured; job search serves cache or mock data.
    pub job_provider: Option<Arc<dyn JobSearchProvider>>,
    pub messages: MessageHub,
}
