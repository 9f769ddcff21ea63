mod assessment;
mod auth;
mod careers;
mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod mentors;
mod messaging;
mod models;
mod roadmap;
mod routes;
mod state;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::predictor::{CareerPredictor, HttpPredictor};
use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::jsearch::{JSearchClient, JobSearchProvider};
use crate::llm_client::LlmClient;
use crate::messaging::hub::MessageHub;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillScope API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    info!("Database pool ready");

    let llm = match config.anthropic_api_key.clone() {
        Some(key) => {
            let client = LlmClient::new(key)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, using rule-based recommendations and roadmaps");
            None
        }
    };

    let job_provider: Option<Arc<dyn JobSearchProvider>> = match config.rapid_api_key.clone() {
        Some(key) => {
            let client: Arc<dyn JobSearchProvider> = Arc::new(JSearchClient::new(key)?);
            info!("JSearch provider enabled");
            Some(client)
        }
        None => {
            warn!("RAPID_API_KEY not set, job trends served from cache or sample listings");
            None
        }
    };

    let predictor: Arc<dyn CareerPredictor> = Arc::new(HttpPredictor::new(&config.predictor_url)?);
    info!("Career predictor at {}", config.predictor_url);

    let state = AppState {
        db,
        jwt: JwtVerifier::new(&config.jwt_secret),
        llm,
        predictor,
        job_provider,
        messages: MessageHub::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
