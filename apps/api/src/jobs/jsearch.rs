//! JSearch (RapidAPI) job-search client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::job::JobListing;

const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DESCRIPTION_PREVIEW_CHARS: usize = 500;
pub const SOURCE_NAME: &str = "JSearch";

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job search returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    async fn search(&self, domain: &str, location: &str) -> Result<Vec<JobListing>, JobSearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawJob>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawJob {
    pub job_title: Option<String>,
    pub employer_name: Option<String>,
    pub job_city: Option<String>,
    pub job_country: Option<String>,
    pub job_description: Option<String>,
    pub job_apply_link: Option<String>,
    pub job_min_salary: Option<f64>,
    pub job_max_salary: Option<f64>,
}

pub struct JSearchClient {
    client: Client,
    api_key: String,
}

impl JSearchClient {
    pub fn new(api_key: String) -> Result<Self, JobSearchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl JobSearchProvider for JSearchClient {
    async fn search(&self, domain: &str, location: &str) -> Result<Vec<JobListing>, JobSearchError> {
        let query = format!("{domain} in {location}");
        let response = self
            .client
            .get(JSEARCH_URL)
            .query(&[("query", query.as_str()), ("page", "1"), ("num_pages", "1")])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobSearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        let now = Utc::now();
        Ok(body
            .data
            .into_iter()
            .map(|raw| to_listing(raw, domain, now))
            .collect())
    }
}

/// Maps a JSearch result onto the cache row shape.
pub fn to_listing(raw: RawJob, domain: &str, now: DateTime<Utc>) -> JobListing {
    let location = match (raw.job_city, raw.job_country) {
        (Some(city), Some(country)) if !city.is_empty() => format!("{city}, {country}"),
        (Some(city), _) if !city.is_empty() => city,
        _ => "Remote".to_string(),
    };
    let description = raw
        .job_description
        .filter(|d| !d.is_empty())
        .map(|d| {
            let preview: String = d.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{preview}...")
        })
        .unwrap_or_default();
    let salary_range = match (raw.job_min_salary, raw.job_max_salary) {
        (Some(min), Some(max)) => format!("${}-${}", format_amount(min), format_amount(max)),
        (Some(min), None) => format!("${}+", format_amount(min)),
        _ => "Not Disclosed".to_string(),
    };

    JobListing {
        id: None,
        title: raw.job_title.unwrap_or_default(),
        company: raw.employer_name.unwrap_or_default(),
        location,
        description: Some(description),
        url: raw.job_apply_link,
        salary_range,
        source: SOURCE_NAME.to_string(),
        domain: domain.to_string(),
        created_at: Some(now),
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawJob {
        RawJob {
            job_title: Some("Backend Engineer".into()),
            employer_name: Some("Acme".into()),
            job_city: Some("Berlin".into()),
            job_country: Some("DE".into()),
            job_description: Some("Build APIs.".into()),
            job_apply_link: Some("https://acme.example/apply".into()),
            job_min_salary: Some(70000.0),
            job_max_salary: Some(90000.0),
        }
    }

    #[test]
    fn test_to_listing_maps_fields() {
        let now = Utc::now();
        let listing = to_listing(raw(), "Software Engineer", now);
        assert_eq!(listing.title, "Backend Engineer");
        assert_eq!(listing.company, "Acme");
        assert_eq!(listing.location, "Berlin, DE");
        assert_eq!(listing.description.as_deref(), Some("Build APIs...."));
        assert_eq!(listing.salary_range, "$70000-$90000");
        assert_eq!(listing.source, "JSearch");
        assert_eq!(listing.domain, "Software Engineer");
        assert_eq!(listing.created_at, Some(now));
    }

    #[test]
    fn test_to_listing_defaults_for_sparse_result() {
        let listing = to_listing(RawJob::default(), "Nurse", Utc::now());
        assert_eq!(listing.location, "Remote");
        assert_eq!(listing.description.as_deref(), Some(""));
        assert_eq!(listing.salary_range, "Not Disclosed");
    }

    #[test]
    fn test_description_truncated_to_preview() {
        let long = RawJob {
            job_description: Some("é".repeat(800)),
            ..raw()
        };
        let description = to_listing(long, "x", Utc::now()).description.unwrap();
        assert_eq!(description.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn test_open_ended_salary() {
        let job = RawJob {
            job_max_salary: None,
            job_min_salary: Some(55000.5),
            ..raw()
        };
        assert_eq!(to_listing(job, "x", Utc::now()).salary_range, "$55000.5+");
    }

    #[test]
    fn test_max_only_salary_is_not_disclosed() {
        let job = RawJob {
            job_min_salary: None,
            job_max_salary: Some(90000.0),
            ..raw()
        };
        assert_eq!(to_listing(job, "x", Utc::now()).salary_range, "Not Disclosed");
    }

    #[test]
    fn test_search_response_without_data_is_empty() {
        let body: SearchResponse = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(body.data.is_empty());
    }
}
