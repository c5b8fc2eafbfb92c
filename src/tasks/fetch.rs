// src/tasks/fetch.rs

//! Fetching the story dataset from the Algolia Hacker News search API.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::model::FetchSection;

/// One story as returned by the search API.
///
/// `points` and `num_comments` are occasionally null in the API output, so
/// they stay optional and default to zero where the pipeline compares them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub created_at: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub num_comments: Option<i64>,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Story>,
}

/// Unix-epoch bounds `[start, end)` of a calendar year in UTC.
pub fn year_bounds(year: i32) -> Result<(i64, i64)> {
    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .with_context(|| format!("invalid fetch year {year}"))?;
    let end = Utc
        .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
        .single()
        .with_context(|| format!("invalid fetch year {}", year + 1))?;
    Ok((start.timestamp(), end.timestamp()))
}

/// Fetch all stories created within the configured year.
// TODO paginate: this pulls only the first page of results.
pub fn fetch_stories(cfg: &FetchSection) -> Result<Vec<Story>> {
    let (start, end) = year_bounds(cfg.year)?;

    let client = reqwest::blocking::Client::new();
    let response = client
        .get(&cfg.endpoint)
        .query(&[
            ("tags", "story".to_string()),
            (
                "numericFilters",
                format!("created_at_i>={start},created_at_i<{end}"),
            ),
            ("hitsPerPage", cfg.hits_per_page.to_string()),
        ])
        .send()
        .with_context(|| format!("requesting stories from {}", cfg.endpoint))?
        .error_for_status()
        .context("search request rejected")?;

    let parsed: SearchResponse = response.json().context("decoding search response")?;
    info!(stories = parsed.hits.len(), year = cfg.year, "fetched stories");

    Ok(parsed.hits)
}

/// Normalize the API's `created_at` timestamp for table output.
///
/// Falls back to the raw string if the API ever changes its format.
pub fn format_created_at(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.fZ") {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
