//! Seam between the showcase and whatever produces repositories

use crate::error::GitHubResult;
use crate::types::Repository;
use async_trait::async_trait;

/// Produces the repositories the showcase renders
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch repositories ready to render: enriched and ordered
    async fn fetch_repositories(&self) -> GitHubResult<Vec<Repository>>;
}

/// Serves a fixed list, for offline rendering
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    repos: Vec<Repository>,
}

impl StaticSource {
    /// Serve `repos` on every fetch
    pub fn new(repos: Vec<Repository>) -> Self {
        Self { repos }
    }

    /// Serve the built-in demo repositories
    pub fn demo() -> Self {
        Self::new(crate::fallback::fallback_repositories())
    }
}

#[async_trait]
impl RepositorySource for StaticSource {
    async fn fetch_repositories(&self) -> GitHubResult<Vec<Repository>> {
        Ok(self.repos.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_serves_demo() {
        let repos = StaticSource::demo().fetch_repositories().await.unwrap();
        assert_eq!(repos.len(), 3);
        assert!(StaticSource::default().fetch_repositories().await.unwrap().is_empty());
    }
}
