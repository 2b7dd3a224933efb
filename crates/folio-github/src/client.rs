//! GitHub REST API client
//!
//! Lists a user's public repositories, fetches each repository's language
//! breakdown concurrently, and orders the result for the showcase.

use crate::config::GitHubConfig;
use crate::error::{GitHubError, GitHubResult};
use crate::ranking::{language_shares, primary_language_share, sort_for_showcase};
use crate::source::RepositorySource;
use crate::types::{LanguageShare, Repository};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Media type requested from the API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API client with connection pooling
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new client with the given configuration
    pub fn new(config: GitHubConfig) -> GitHubResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| GitHubError::InvalidUrl(e.to_string()))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(4)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client for `username` with default settings
    pub fn with_defaults(username: impl Into<String>) -> GitHubResult<Self> {
        Self::new(GitHubConfig::new(username))
    }

    /// The active configuration
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> GitHubResult<Url> {
        let mut url = Url::parse(&self.config.api_base)?;
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `/users/{username}/repos` with the listing query
    pub fn repos_url(&self) -> GitHubResult<Url> {
        let mut url = self.endpoint(["users", self.config.username.as_str(), "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("direction", "desc")
            .append_pair("per_page", &self.config.limit.to_string())
            .append_pair("type", "public");
        Ok(url)
    }

    /// `/repos/{owner}/{name}/languages`
    pub fn languages_url(&self, full_name: &str) -> GitHubResult<Url> {
        self.endpoint(
            std::iter::once("repos")
                .chain(full_name.split('/'))
                .chain(std::iter::once("languages")),
        )
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn get(&self, url: Url) -> GitHubResult<Response> {
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request failed: {}", e);
            GitHubError::Request(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {}", status);
            Ok(response)
        } else {
            warn!("GitHub answered {}", status);
            Err(GitHubError::Status(status.as_u16()))
        }
    }

    /// Parse a JSON response into the specified type
    async fn parse_response<T>(&self, response: Response) -> GitHubResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let text = response.text().await?;
        debug!("Response body: {} bytes", text.len());
        Ok(serde_json::from_str(&text)?)
    }

    /// List the public repositories, most recently updated first, as GitHub returns them
    #[instrument(skip(self), fields(username = %self.config.username, limit = self.config.limit))]
    pub async fn list_repositories(&self) -> GitHubResult<Vec<Repository>> {
        info!("Fetching repositories");
        let response = self.get(self.repos_url()?).await?;
        let repos: Vec<Repository> = self.parse_response(response).await?;
        info!("Fetched {} repositories", repos.len());
        Ok(repos)
    }

    /// Language breakdown of one repository
    #[instrument(skip(self))]
    pub async fn repository_languages(&self, full_name: &str) -> GitHubResult<Vec<LanguageShare>> {
        let response = self.get(self.languages_url(full_name)?).await?;
        let bytes: BTreeMap<String, u64> = self.parse_response(response).await?;
        Ok(language_shares(&bytes))
    }

    /// Attach the language breakdown, falling back to the primary language
    async fn with_languages(&self, mut repo: Repository) -> Repository {
        repo.languages = match self.repository_languages(&repo.full_name).await {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Error fetching languages for {}: {}", repo.name, e);
                primary_language_share(repo.language.as_deref())
            }
        };
        repo
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_repositories(&self) -> GitHubResult<Vec<Repository>> {
        let repos = self.list_repositories().await?;

        let mut repos = if self.config.fetch_languages {
            join_all(repos.into_iter().map(|repo| self.with_languages(repo))).await
        } else {
            repos
                .into_iter()
                .map(|mut repo| {
                    repo.languages = primary_language_share(repo.language.as_deref());
                    repo
                })
                .collect()
        };

        sort_for_showcase(&mut repos);
        Ok(repos)
    }
}
