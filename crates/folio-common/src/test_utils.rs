//! Test utilities shared across the Folio workspace.
//!
//! Enabled for dependent crates through the `testing` feature.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests once per test binary.
///
/// Output goes through the test writer so it only shows for failing tests.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Fixed UTC timestamp for fixtures.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("valid fixture timestamp")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Configuration-related test fixtures.
pub mod config_fixtures {
    /// Minimal YAML configuration overriding only the essentials.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
i18n:
  default_language: "es"

github:
  username: "octocat"
  limit: 4
"#
    }

    /// Full YAML configuration touching every section.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "site:\n",
            "  owner: \"Ezequiel Caviglione\"\n",
            "  base_url: \"https://ezequiel.dev\"\n",
            "\n",
            "i18n:\n",
            "  default_language: \"en\"\n",
            "  locales_dir: \"./locales\"\n",
            "  missing_key_warnings: true\n",
            "\n",
            "github:\n",
            "  api_base: \"https://api.github.com\"\n",
            "  username: \"Ezequiel-Caviglione\"\n",
            "  limit: 6\n",
            "  timeout_secs: 10\n",
            "  fetch_languages: false\n",
            "\n",
            "contact:\n",
            "  form_id: \"xyzabc12\"\n",
            "  banner_secs: 5\n",
            "\n",
            "storage:\n",
            "  dir: \"./.folio\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json: true\n",
        )
    }

    /// YAML that parses but fails validation.
    pub fn invalid_config_yaml() -> &'static str {
        r#"
i18n:
  default_language: "fr"

github:
  username: ""
  limit: 0
"#
    }
}
