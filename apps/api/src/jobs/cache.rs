//! The `jobs_cache` table: recent search results kept to save API quota.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::job::JobListing;

const CACHE_READ_LIMIT: i64 = 20;

#[async_trait]
pub trait JobsCache: Send + Sync {
    /// Listings stored at or after `since` whose domain contains `domain`,
    /// case-insensitively.
    async fn recent(&self, domain: &str, since: DateTime<Utc>) -> Result<Vec<JobListing>, sqlx::Error>;

    async fn store(&self, jobs: &[JobListing]) -> Result<(), sqlx::Error>;
}

pub struct PgJobsCache {
    pool: PgPool,
}

impl PgJobsCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobsCache for PgJobsCache {
    async fn recent(&self, domain: &str, since: DateTime<Utc>) -> Result<Vec<JobListing>, sqlx::Error> {
        sqlx::query_as::<_, JobListing>(
            r#"
            SELECT id, title, company, location, description, url,
                   salary_range, source, domain, created_at
            FROM jobs_cache
            WHERE created_at >= $1 AND domain ILIKE $2
            LIMIT $3
            "#,
        )
        .bind(since)
        .bind(contains_pattern(domain))
        .bind(CACHE_READ_LIMIT)
        .fetch_all(&self.pool)
        .await
    }

    async fn store(&self, jobs: &[JobListing]) -> Result<(), sqlx::Error> {
        if jobs.is_empty() {
            return Ok(());
        }
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO jobs_cache \
             (title, company, location, description, url, salary_range, source, domain, created_at) ",
        );
        builder.push_values(jobs, |mut row, job| {
            row.push_bind(job.title.clone())
                .push_bind(job.company.clone())
                .push_bind(job.location.clone())
                .push_bind(job.description.clone())
                .push_bind(job.url.clone())
                .push_bind(job.salary_range.clone())
                .push_bind(job.source.clone())
                .push_bind(job.domain.clone())
                .push_bind(job.created_at.unwrap_or_else(Utc::now));
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }
}

/// `%domain%` with LIKE metacharacters in the domain escaped.
fn contains_pattern(domain: &str) -> String {
    let mut pattern = String::with_capacity(domain.len() + 2);
    pattern.push('%');
    for c in domain.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
