use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates the Postgres pool backing every table read and write.
///
/// The statement cache is disabled so the pool also works behind Supabase's
/// transaction-mode pooler, which does not keep prepared statements between
/// transactions.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let options = PgConnectOptions::from_str(database_url)
        .context("DATABASE_URL is not a valid Postgres connection string")?
        .statement_cache_capacity(0);

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    info!("PostgreSQL pool established (max {MAX_CONNECTIONS} connections)");
    Ok(pool)
}
