//! Configuration validation.

use crate::loader::ConfigError;
use crate::schema::Config;
use folio_i18n::Locale;
use std::fmt;
use url::Url;

/// Accepted range for `github.limit`.
pub const GITHUB_LIMIT_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a language code against the supported locales
pub fn validate_language(code: &str) -> Result<(), String> {
    match Locale::from_code(code) {
        Some(_) => Ok(()),
        None => Err(format!(
            "unsupported language '{}', expected one of {}",
            code,
            Locale::all().map(Locale::code).join(", ")
        )),
    }
}

/// Validate an absolute http(s) URL
pub fn validate_http_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{value}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported URL scheme '{other}'")),
    }
}

/// Validate a log filter: a plain level, or directives containing `=`
pub fn validate_log_level(level: &str) -> Result<(), String> {
    if level.contains('=') || LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(format!("unknown log level '{level}'"))
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Collect every problem in `config`.
    pub fn issues(config: &Config) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if let Err(e) = validate_http_url(&config.site.base_url) {
            issues.push(ValidationIssue::new("site.base_url", e));
        }
        if let Err(e) = validate_language(&config.i18n.default_language) {
            issues.push(ValidationIssue::new("i18n.default_language", e));
        }
        if let Err(e) = validate_http_url(&config.github.api_base) {
            issues.push(ValidationIssue::new("github.api_base", e));
        }
        if config.github.username.trim().is_empty() {
            issues.push(ValidationIssue::new("github.username", "must not be empty"));
        }
        if !GITHUB_LIMIT_RANGE.contains(&config.github.limit) {
            issues.push(ValidationIssue::new(
                "github.limit",
                format!(
                    "{} is outside {}..={}",
                    config.github.limit,
                    GITHUB_LIMIT_RANGE.start(),
                    GITHUB_LIMIT_RANGE.end()
                ),
            ));
        }
        if config.github.timeout_secs == 0 {
            issues.push(ValidationIssue::new("github.timeout_secs", "must be positive"));
        }
        if let Err(e) = validate_log_level(&config.logging.level) {
            issues.push(ValidationIssue::new("logging.level", e));
        }

        issues
    }

    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let issues = Self::issues(config);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(issues))
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language() {
        assert!(validate_language("es").is_ok());
        assert!(validate_language("en-US").is_ok());
        assert!(validate_language("fr").is_err());
        assert!(validate_language("").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://api.github.com").is_ok());
        assert!(validate_http_url("http://localhost:4321").is_ok());
        assert!(validate_http_url("ftp://example.com").is_err());
        assert!(validate_http_url("not a url").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("folio_github=trace,info").is_ok());
        assert!(validate_log_level("loud").is_err());
    }

    #[test]
    fn test_issues_name_every_bad_field() {
        let mut config = Config::default();
        config.i18n.default_language = "fr".to_string();
        config.github.username = "  ".to_string();
        config.github.limit = 0;

        let fields: Vec<_> = ConfigValidator::issues(&config).into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["i18n.default_language", "github.username", "github.limit"]);
    }

    #[test]
    fn test_limit_bounds() {
        let mut config = Config::default();
        config.github.limit = 100;
        assert!(config.validate().is_ok());
        config.github.limit = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
