// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file:
///
/// ```toml
/// [cache]
/// root = ".hnpipe/cache"
///
/// [fetch]
/// year = 2014
/// hits_per_page = 100
///
/// [keywords]
/// top = 100
/// ```
///
/// All sections are optional and have reasonable defaults. This raw form is
/// deserialization-only; use [`ConfigFile::try_from`] to obtain a validated
/// config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub fetch: FetchSection,

    #[serde(default)]
    pub keywords: KeywordsSection,
}

/// A validated configuration.
///
/// Construct via `TryFrom<RawConfigFile>` (see `config::validate`), which
/// checks section sanity before handing the config to the rest of the
/// application.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub cache: CacheSection,
    pub fetch: FetchSection,
    pub keywords: KeywordsSection,
}

impl ConfigFile {
    /// Build a `ConfigFile` without validation. Only `config::validate`
    /// should call this.
    pub(crate) fn new_unchecked(
        cache: CacheSection,
        fetch: FetchSection,
        keywords: KeywordsSection,
    ) -> Self {
        Self {
            cache,
            fetch,
            keywords,
        }
    }
}

/// `[cache]` section: where task results are persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Storage root for cached task results, one JSON file per task.
    #[serde(default = "default_cache_root")]
    pub root: PathBuf,
}

fn default_cache_root() -> PathBuf {
    PathBuf::from(".hnpipe/cache")
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            root: default_cache_root(),
        }
    }
}

/// `[fetch]` section: which slice of the Hacker News dataset to pull.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSection {
    /// Algolia HN search endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Stories created within this calendar year (UTC) are fetched.
    #[serde(default = "default_year")]
    pub year: i32,

    /// Page size for the search request.
    #[serde(default = "default_hits_per_page")]
    pub hits_per_page: u32,
}

fn default_endpoint() -> String {
    "http://hn.algolia.com/api/v1/search_by_date".to_string()
}

fn default_year() -> i32 {
    2014
}

fn default_hits_per_page() -> u32 {
    100
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            year: default_year(),
            hits_per_page: default_hits_per_page(),
        }
    }
}

/// `[keywords]` section: ranking output.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsSection {
    /// How many top keywords the terminal task reports.
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    100
}

impl Default for KeywordsSection {
    fn default() -> Self {
        Self {
            top: default_top(),
        }
    }
}
