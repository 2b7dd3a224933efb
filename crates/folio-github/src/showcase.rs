//! State behind the projects section

use crate::fallback::fallback_repositories;
use crate::source::RepositorySource;
use crate::types::Repository;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// What the projects section renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseSnapshot {
    /// Repositories to show
    pub repos: Vec<Repository>,
    /// A request is in flight
    pub loading: bool,
    /// Message of the last failed request
    pub error: Option<String>,
}

impl Default for ShowcaseSnapshot {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// Repository list with loading and error state
///
/// A failed request keeps the error message and shows the static fallback
/// dataset so the section never renders empty. Nothing is retried on its
/// own; [`ProjectShowcase::refetch`] is the user-triggered retry.
pub struct ProjectShowcase {
    source: Arc<dyn RepositorySource>,
    state: RwLock<ShowcaseSnapshot>,
}

impl fmt::Debug for ProjectShowcase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectShowcase")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl ProjectShowcase {
    /// Showcase over `source`, in the loading state until the first load finishes
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self {
            source,
            state: RwLock::new(ShowcaseSnapshot::default()),
        }
    }

    /// Issue one request and record its outcome
    #[instrument(skip(self))]
    pub async fn load(&self) -> ShowcaseSnapshot {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.source.fetch_repositories().await;

        let mut state = self.state.write();
        match result {
            Ok(repos) => {
                info!("Showcase loaded {} repositories", repos.len());
                state.repos = repos;
            }
            Err(e) => {
                warn!("Showcase falling back to demo repositories: {}", e);
                state.error = Some(e.to_string());
                state.repos = fallback_repositories();
            }
        }
        state.loading = false;
        state.clone()
    }

    /// Re-issue the request, independent of earlier outcomes
    pub async fn refetch(&self) -> ShowcaseSnapshot {
        self.load().await
    }

    /// Current state
    pub fn snapshot(&self) -> ShowcaseSnapshot {
        self.state.read().clone()
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Message of the last failed request
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }
}
