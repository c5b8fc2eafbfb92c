// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HnpipeError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = HnpipeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.cache, raw.fetch, raw.keywords))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_cache(cfg)?;
    validate_fetch(cfg)?;
    validate_keywords(cfg)?;
    Ok(())
}

fn validate_cache(cfg: &RawConfigFile) -> Result<()> {
    if cfg.cache.root.as_os_str().is_empty() {
        return Err(HnpipeError::ConfigError(
            "[cache].root must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_fetch(cfg: &RawConfigFile) -> Result<()> {
    if !cfg.fetch.endpoint.starts_with("http://") && !cfg.fetch.endpoint.starts_with("https://") {
        return Err(HnpipeError::ConfigError(format!(
            "[fetch].endpoint must be an http(s) URL (got '{}')",
            cfg.fetch.endpoint
        )));
    }

    // The Algolia filter works on Unix epoch seconds.
    if !(1970..=2100).contains(&cfg.fetch.year) {
        return Err(HnpipeError::ConfigError(format!(
            "[fetch].year must be between 1970 and 2100 (got {})",
            cfg.fetch.year
        )));
    }

    if cfg.fetch.hits_per_page == 0 || cfg.fetch.hits_per_page > 1000 {
        return Err(HnpipeError::ConfigError(format!(
            "[fetch].hits_per_page must be between 1 and 1000 (got {})",
            cfg.fetch.hits_per_page
        )));
    }

    Ok(())
}

fn validate_keywords(cfg: &RawConfigFile) -> Result<()> {
    if cfg.keywords.top == 0 {
        return Err(HnpipeError::ConfigError(
            "[keywords].top must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
