#![allow(dead_code)]

use std::path::PathBuf;

use hnpipe::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    raw: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
        }
    }

    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.raw.cache.root = root.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.raw.fetch.endpoint = endpoint.to_string();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.raw.fetch.year = year;
        self
    }

    pub fn with_hits_per_page(mut self, hits: u32) -> Self {
        self.raw.fetch.hits_per_page = hits;
        self
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.raw.keywords.top = top;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
