use std::io::Write;
use std::path::PathBuf;

use hnpipe::config::model::{ConfigFile, RawConfigFile};
use hnpipe::config::{default_config_path, load_and_validate};
use hnpipe::errors::HnpipeError;

#[test]
fn empty_config_gets_defaults() {
    let raw: RawConfigFile = toml::from_str("").unwrap();
    let cfg = ConfigFile::try_from(raw).unwrap();

    assert_eq!(cfg.cache.root, PathBuf::from(".hnpipe/cache"));
    assert_eq!(cfg.fetch.year, 2014);
    assert_eq!(cfg.fetch.hits_per_page, 100);
    assert_eq!(cfg.keywords.top, 100);
}

#[test]
fn full_config_parses() {
    let raw: RawConfigFile = toml::from_str(
        r#"
        [cache]
        root = "/tmp/hnpipe-cache"

        [fetch]
        endpoint = "https://hn.algolia.com/api/v1/search_by_date"
        year = 2020
        hits_per_page = 50

        [keywords]
        top = 25
        "#,
    )
    .unwrap();
    let cfg = ConfigFile::try_from(raw).unwrap();

    assert_eq!(cfg.cache.root, PathBuf::from("/tmp/hnpipe-cache"));
    assert_eq!(cfg.fetch.year, 2020);
    assert_eq!(cfg.fetch.hits_per_page, 50);
    assert_eq!(cfg.keywords.top, 25);
}

#[test]
fn out_of_range_year_is_rejected() {
    let raw: RawConfigFile = toml::from_str("[fetch]\nyear = 1800").unwrap();
    let err = ConfigFile::try_from(raw).unwrap_err();
    assert!(matches!(err, HnpipeError::ConfigError(_)));
}

#[test]
fn zero_hits_per_page_is_rejected() {
    let raw: RawConfigFile = toml::from_str("[fetch]\nhits_per_page = 0").unwrap();
    assert!(ConfigFile::try_from(raw).is_err());
}

#[test]
fn non_http_endpoint_is_rejected() {
    let raw: RawConfigFile = toml::from_str("[fetch]\nendpoint = \"ftp://nope\"").unwrap();
    assert!(ConfigFile::try_from(raw).is_err());
}

#[test]
fn zero_top_keywords_is_rejected() {
    let raw: RawConfigFile = toml::from_str("[keywords]\ntop = 0").unwrap();
    assert!(ConfigFile::try_from(raw).is_err());
}

#[test]
fn load_and_validate_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[fetch]\nyear = 2019").unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.fetch.year, 2019);
}

#[test]
fn load_of_invalid_toml_is_a_toml_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "not [valid toml").unwrap();

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, HnpipeError::TomlError(_)));
}

#[test]
fn default_config_path_is_project_local() {
    assert_eq!(default_config_path(), PathBuf::from("Hnpipe.toml"));
}
