//! Folio - Main Entry Point

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use folio_config::{Config, ConfigLoader};
use folio_contact::{check_relay_config, ContactError, ContactForm, RelayConfig};
use folio_github::StaticSource;
use folio_i18n::{Locale, DEFAULT_REPORT_INTERVAL};
use folio_site::FolioSite;
use std::sync::Arc;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Language to render in (`es` or `en`), overriding the stored preference
    #[arg(long)]
    lang: Option<String>,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use the demo repositories instead of calling GitHub
    #[arg(long)]
    offline: bool,

    /// Switch to the other language before rendering and remember it
    #[arg(long)]
    toggle_language: bool,

    /// Switch between light and dark before rendering and remember it
    #[arg(long)]
    toggle_theme: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every section as text
    Render,
    /// Send a message through the contact form
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,
        /// Reply address
        #[arg(long)]
        email: String,
        /// Subject line
        #[arg(long)]
        subject: String,
        /// Message body
        #[arg(long)]
        message: String,
    },
    /// Print the contact relay configuration as JSON
    CheckRelay,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

async fn build_site(args: &Args, config: Config) -> Result<FolioSite> {
    let locale = match &args.lang {
        Some(code) => Some(Locale::from_code(code).ok_or_else(|| anyhow!("Unsupported language '{code}'"))?),
        None => None,
    };

    let mut builder = FolioSite::builder(config).locale(locale);
    if args.offline {
        builder = builder.repository_source(Arc::new(StaticSource::demo()));
    }
    let site = builder.build().await?;

    if args.toggle_language {
        let locale = site.language().toggle_locale();
        info!("Language switched to {}", locale.display_name());
    }
    if args.toggle_theme {
        let theme = site.theme().toggle();
        info!("Theme switched to {}", theme);
    }
    Ok(site)
}

async fn send_message(site: &FolioSite, form: ContactForm) -> Result<()> {
    let language = site.language();
    site.contact().set_form(form);
    match site.contact().submit().await {
        Ok(()) => {
            println!("{}", language.t("contact.modal.status.success.title"));
            Ok(())
        }
        Err(ContactError::Invalid(errors)) => {
            for (field, message) in errors.translate(|key| language.t(key)) {
                println!("{}: {}", language.t(field.label_key()), message);
            }
            Err(anyhow!("Contact form is invalid"))
        }
        Err(e) => {
            println!("{}", language.t("contact.modal.status.error.description"));
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    folio_common::init_logging(config.logging.to_logging_config()).map_err(|e| anyhow!(e))?;
    info!("Starting folio {}", env!("CARGO_PKG_VERSION"));

    if let Some(Command::CheckRelay) = &args.command {
        let check = check_relay_config(&RelayConfig::new(config.contact.form_id.clone()));
        println!("{}", serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    let site = build_site(&args, config).await?;
    let _reporter = cfg!(debug_assertions).then(|| site.spawn_metrics_reporter(DEFAULT_REPORT_INTERVAL));

    let result = match &args.command {
        Some(Command::Contact {
            name,
            email,
            subject,
            message,
        }) => send_message(&site, ContactForm::new(name, email, subject, message)).await,
        _ => {
            site.load_projects().await;
            println!("{}", site.render_page());
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("folio failed: {}", e);
    }
    site.language().resolver().metrics_recorder().log_report();
    result
}
