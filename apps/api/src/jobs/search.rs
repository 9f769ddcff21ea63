//! Job search: cache first, then one live search, then a fixed mock list.

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};

use crate::jobs::cache::JobsCache;
use crate::jobs::jsearch::JobSearchProvider;
use crate::models::job::JobListing;

pub const DEFAULT_DOMAIN: &str = "Software Engineer";
pub const DEFAULT_LOCATION: &str = "Remote";
const CACHE_WINDOW_HOURS: i64 = 24;

pub async fn find_jobs(
    cache: &dyn JobsCache,
    provider: Option<&dyn JobSearchProvider>,
    domain: &str,
    location: &str,
    now: DateTime<Utc>,
) -> Result<Vec<JobListing>, sqlx::Error> {
    let since = now - Duration::hours(CACHE_WINDOW_HOURS);
    let cached = cache.recent(domain, since).await?;
    if !cached.is_empty() {
        info!("Serving {} jobs for '{domain}' from cache", cached.len());
        return Ok(cached);
    }

    if let Some(provider) = provider {
        info!("Fetching live jobs for '{domain}' in '{location}'");
        match provider.search(domain, location).await {
            Ok(live) if !live.is_empty() => {
                if let Err(e) = cache.store(&live).await {
                    error!("Failed to cache job results: {e}");
                }
                return Ok(live);
            }
            Ok(_) => info!("Live search returned no jobs for '{domain}'"),
            Err(e) => warn!("Live job search failed, using mock data: {e}"),
        }
    }

    info!("Using mock jobs for '{domain}'");
    Ok(mock_jobs(domain))
}

pub fn mock_jobs(domain: &str) -> Vec<JobListing> {
    let mock = |title: String, company: &str, location: &str, salary: &str| JobListing {
        id: None,
        title,
        company: company.to_string(),
        location: location.to_string(),
        description: None,
        url: None,
        salary_range: salary.to_string(),
        source: "Mock".to_string(),
        domain: domain.to_string(),
        created_at: None,
    };
    vec![
        mock(format!("{domain} - Junior"), "Tech Corp", "Remote", "$60k-$80k"),
        mock(format!("Senior {domain}"), "Innovate Ltd", "New York, USA", "$120k-$160k"),
        mock(format!("{domain} Specialist"), "Future AI", "San Francisco, USA", "$140k+"),
    ]
}
