//! Site assembly
//!
//! [`FolioSiteBuilder`] turns a [`Config`] into a running [`FolioSite`]:
//! dictionaries are loaded once, the language and theme holders read their
//! stored preferences, and the showcase and contact controller get their
//! network backends. Every backend can be replaced before building.

use crate::error::SiteResult;
use crate::render;
use folio_config::Config;
use folio_contact::{ContactController, FormRelay, MessageRelay, RelayConfig};
use folio_github::{GitHubClient, GitHubConfig, ProjectShowcase, RepositorySource, ShowcaseSnapshot};
use folio_i18n::{
    DictionaryLoader, DictionarySource, DirectorySource, EmbeddedSource, FileStorage, LanguageScope,
    LanguageState, Locale, PreferenceStorage, ReporterHandle, Resolver, ResolverOptions, ThemeState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Builder for [`FolioSite`]
#[derive(Default)]
pub struct FolioSiteBuilder {
    config: Config,
    storage: Option<Arc<dyn PreferenceStorage>>,
    repository_source: Option<Arc<dyn RepositorySource>>,
    relay: Option<Arc<dyn MessageRelay>>,
    locale: Option<Locale>,
    system_prefers_dark: bool,
}

impl FolioSiteBuilder {
    /// Start from `config`
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Use `storage` for the language and theme preferences
    pub fn storage(mut self, storage: Arc<dyn PreferenceStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use `source` instead of the GitHub API
    pub fn repository_source(mut self, source: Arc<dyn RepositorySource>) -> Self {
        self.repository_source = Some(source);
        self
    }

    /// Use `relay` instead of the hosted form endpoint
    pub fn relay(mut self, relay: Arc<dyn MessageRelay>) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Start in `locale` regardless of the stored preference
    pub fn locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    /// Whether the system theme resolves to dark
    pub fn system_prefers_dark(mut self, dark: bool) -> Self {
        self.system_prefers_dark = dark;
        self
    }

    /// Load dictionaries and wire every component
    #[instrument(skip(self))]
    pub async fn build(self) -> SiteResult<FolioSite> {
        let config = Arc::new(self.config);

        let source: Arc<dyn DictionarySource> = match &config.i18n.locales_dir {
            Some(dir) => {
                debug!("Loading dictionaries from {:?}", dir);
                Arc::new(DirectorySource::new(dir))
            }
            None => Arc::new(EmbeddedSource),
        };
        let store = DictionaryLoader::new(source).load_store(&Locale::all()).await?;
        let resolver = Arc::new(Resolver::with_options(
            store,
            ResolverOptions {
                warn_missing: config.i18n.missing_key_warnings,
                ..ResolverOptions::default()
            },
        ));

        let storage: Arc<dyn PreferenceStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::new(&config.storage.dir)),
        };
        let default_locale = config.i18n.locale().unwrap_or(Locale::DEFAULT);
        let language = LanguageState::with_default(resolver, Arc::clone(&storage), self.locale, default_locale);
        let theme = ThemeState::new(storage, self.system_prefers_dark);

        let repository_source: Arc<dyn RepositorySource> = match self.repository_source {
            Some(source) => source,
            None => {
                let github = &config.github;
                let client = GitHubClient::new(
                    GitHubConfig::new(&github.username)
                        .with_api_base(&github.api_base)
                        .with_limit(github.limit)
                        .with_timeout(github.timeout_secs)
                        .with_languages(github.fetch_languages),
                )?;
                Arc::new(client)
            }
        };

        let relay: Arc<dyn MessageRelay> = match self.relay {
            Some(relay) => relay,
            None => Arc::new(FormRelay::new(RelayConfig::new(config.contact.form_id.clone()))?),
        };
        let contact = ContactController::with_banner_duration(relay, config.contact.banner_duration());

        info!("Site assembled for {}", config.site.owner);
        Ok(FolioSite {
            config,
            language,
            theme,
            showcase: ProjectShowcase::new(repository_source),
            contact,
        })
    }
}

/// The assembled portfolio
pub struct FolioSite {
    config: Arc<Config>,
    language: Arc<LanguageState>,
    theme: ThemeState,
    showcase: ProjectShowcase,
    contact: ContactController,
}

impl FolioSite {
    /// Builder starting from `config`
    pub fn builder(config: Config) -> FolioSiteBuilder {
        FolioSiteBuilder::new(config)
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Language state holder
    pub fn language(&self) -> &Arc<LanguageState> {
        &self.language
    }

    /// Theme holder
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Repository showcase
    pub fn showcase(&self) -> &ProjectShowcase {
        &self.showcase
    }

    /// Contact form controller
    pub fn contact(&self) -> &ContactController {
        &self.contact
    }

    /// Log translation lookup metrics every `interval` until the handle drops
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn_metrics_reporter(&self, interval: Duration) -> ReporterHandle {
        folio_i18n::spawn_reporter(self.language.resolver().metrics_recorder(), interval)
    }

    /// Fetch the repositories shown in the projects section
    pub async fn load_projects(&self) -> ShowcaseSnapshot {
        self.showcase.load().await
    }

    /// Render every section in the current language
    pub fn render_page(&self) -> String {
        let snapshot = self.showcase.snapshot();
        let status = self.contact.status();
        let relay_configured = self.contact.relay_configured();
        let theme = self.theme.resolved();

        LanguageScope::run(Arc::clone(&self.language), || {
            [
                render::navigation(),
                render::hero(),
                render::timeline(),
                render::projects(&snapshot),
                render::contact(status, relay_configured),
                render::footer(theme),
            ]
            .join("\n")
        })
    }
}
