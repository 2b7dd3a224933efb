//! Integration tests for folio-config crate.

use folio_common::test_utils::config_fixtures;
use folio_config::{ConfigError, ConfigFormat, ConfigLoader};
use folio_i18n::Locale;
use std::io::Write;

fn yaml_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_minimal_fixture() {
    let config = ConfigLoader::parse_str(config_fixtures::minimal_config_yaml(), ConfigFormat::Yaml).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.github.username, "octocat");
    assert_eq!(config.github.limit, 4);
    assert_eq!(config.contact.banner_secs, 3);
}

#[test]
fn test_full_fixture() {
    let config = ConfigLoader::parse_str(config_fixtures::full_config_yaml(), ConfigFormat::Yaml).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.i18n.locale(), Some(Locale::English));
    assert!(!config.github.fetch_languages);
    assert_eq!(config.github.timeout_secs, 10);
    assert_eq!(config.contact.form_id.as_deref(), Some("xyzabc12"));
    assert_eq!(config.contact.banner_duration().as_secs(), 5);
    assert_eq!(config.site.base_url, "https://ezequiel.dev");

    let logging = config.logging.to_logging_config();
    assert!(logging.json_format);
    assert_eq!(logging.level, "debug");
}

#[test]
fn test_invalid_fixture_reports_every_field() {
    let config = ConfigLoader::parse_str(config_fixtures::invalid_config_yaml(), ConfigFormat::Yaml).unwrap();
    match config.validate() {
        Err(ConfigError::Validation(issues)) => assert_eq!(issues.len(), 3),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_load_config_from_file() {
    let file = yaml_file(config_fixtures::full_config_yaml());
    let config = ConfigLoader::load_config(file.path()).unwrap();
    assert_eq!(config.github.timeout_secs, 10);
    assert!(!config.github.fetch_languages);
}

#[test]
fn test_invalid_file_is_rejected() {
    let file = yaml_file(config_fixtures::invalid_config_yaml());
    assert!(matches!(
        ConfigLoader::load_config(file.path()),
        Err(ConfigError::Validation(_))
    ));
}
