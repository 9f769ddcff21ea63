use anyhow::{Context, Result};

const DEFAULT_PREDICTOR_URL: &str = "http://127.0.0.1:5000";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing. Optional API keys
/// that are absent switch the matching adapter to its local fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub anthropic_api_key: Option<String>,
    pub rapid_api_key: Option<String>,
    pub predictor_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("SUPABASE_JWT_SECRET")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            rapid_api_key: optional_env("RAPID_API_KEY"),
            predictor_url: optional_env("PREDICTOR_URL")
                .unwrap_or_else(|| DEFAULT_PREDICTOR_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Blank values count as unset so an empty `KEY=` line in `.env` keeps the fallback active.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
