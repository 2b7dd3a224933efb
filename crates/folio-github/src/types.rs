//! Repository summaries as the showcase renders them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One language's share of a repository's code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    /// Language name as GitHub reports it
    pub name: String,
    /// Rounded percentage of the repository's bytes
    pub percentage: u8,
}

impl LanguageShare {
    /// Build a share
    pub fn new(name: impl Into<String>, percentage: u8) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// Public repository summary
///
/// Deserializes straight from the `/users/{user}/repos` payload; `languages`
/// is absent there and filled in afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// GitHub repository id
    pub id: u64,
    /// Short name
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Repository page
    pub html_url: String,
    /// Project website or demo
    pub homepage: Option<String>,
    /// Primary language
    pub language: Option<String>,
    /// Language breakdown, largest first
    #[serde(default)]
    pub languages: Vec<LanguageShare>,
    /// Star count
    pub stargazers_count: u32,
    /// Fork count
    pub forks_count: u32,
    /// Watcher count
    pub watchers_count: u32,
    /// Size in kilobytes
    pub size: u64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last metadata update
    pub updated_at: DateTime<Utc>,
    /// Last push; empty repositories have none
    pub pushed_at: Option<DateTime<Utc>>,
    /// Topic tags
    #[serde(default)]
    pub topics: Vec<String>,
    /// `public` or `private`
    #[serde(default = "default_visibility")]
    pub visibility: String,
}

fn default_visibility() -> String {
    "public".to_string()
}

impl Repository {
    /// Homepage link, ignoring the empty string GitHub uses for "none"
    pub fn demo_url(&self) -> Option<&str> {
        folio_common::non_blank(self.homepage.as_deref())
    }
}
