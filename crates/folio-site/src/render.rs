//! Plain-text rendering of the site sections
//!
//! Every function reads the active language through
//! [`folio_i18n::use_language`], so it must run inside a
//! [`folio_i18n::LanguageScope`].

use crate::timeline::{EntryKind, TIMELINE};
use folio_common::{format_date, truncate_chars};
use folio_contact::SubmissionStatus;
use folio_github::{Repository, ShowcaseSnapshot};
use folio_i18n::{use_language, Theme};
use std::fmt::Write;

const DESCRIPTION_CHARS: usize = 90;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

/// Navigation bar with the language toggle
pub fn navigation() -> String {
    let language = use_language();
    let locale = language.current_locale();
    let items = ["navigation.home", "navigation.about", "navigation.projects", "navigation.contact"]
        .map(|key| language.t(key))
        .join(" | ");
    format!(
        "{items}    [{} -> {}] {}\n",
        locale.short_label(),
        locale.toggled().short_label(),
        language.t("navigation.currentLanguage")
    )
}

/// Hero block
pub fn hero() -> String {
    let language = use_language();
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", language.t("hero.greeting"), language.t("hero.name"));
    let _ = writeln!(out, "{}", language.t("hero.title"));
    let _ = writeln!(out, "{}", language.t("hero.description"));
    let _ = writeln!(out, "[{}] [{}]", language.t("hero.downloadCV"), language.t("hero.contactMe"));
    out
}

/// Timeline grouped by entry kind
pub fn timeline() -> String {
    let language = use_language();
    let mut out = String::new();
    heading(&mut out, &language.t("timeline.title"));
    for kind in [EntryKind::Work, EntryKind::Education] {
        let _ = writeln!(out, "{}:", language.t(kind.heading_key()));
        for entry in TIMELINE.iter().filter(|e| e.kind == kind) {
            let _ = writeln!(
                out,
                "  {} · {} ({}, {})",
                entry.title, entry.organization, entry.location, entry.period
            );
            let _ = writeln!(out, "    {}", entry.technologies.join(", "));
        }
    }
    out
}

fn repository_line(out: &mut String, repo: &Repository) {
    let language = use_language();
    let _ = writeln!(
        out,
        "  {}  ★ {} {} · {} {}",
        repo.name,
        repo.stargazers_count,
        language.t("projects.stars"),
        repo.forks_count,
        language.t("projects.forks"),
    );
    if let Some(description) = folio_common::non_blank(repo.description.as_deref()) {
        let _ = writeln!(out, "    {}", truncate_chars(description, DESCRIPTION_CHARS));
    }
    if !repo.languages.is_empty() {
        let languages: Vec<String> = repo
            .languages
            .iter()
            .map(|l| format!("{} {}%", l.name, l.percentage))
            .collect();
        let _ = writeln!(out, "    {}", languages.join(" · "));
    }
    let _ = writeln!(
        out,
        "    {} {}",
        language.t("projects.updated"),
        format_date(repo.updated_at)
    );
    let _ = write!(out, "    {}: {}", language.t("projects.viewCode"), repo.html_url);
    if let Some(demo) = repo.demo_url() {
        let _ = write!(out, "  {}: {}", language.t("projects.viewProject"), demo);
    }
    out.push('\n');
}

/// Project showcase, including its loading and error states
pub fn projects(snapshot: &ShowcaseSnapshot) -> String {
    let language = use_language();
    let mut out = String::new();
    heading(&mut out, &language.t("projects.title"));
    let _ = writeln!(out, "{}", language.t("projects.subtitle"));

    if snapshot.loading {
        let _ = writeln!(out, "{}", language.t("projects.loading"));
        return out;
    }
    if snapshot.error.is_some() {
        let _ = writeln!(out, "! {} [{}]", language.t("projects.error"), language.t("projects.retry"));
    }
    for repo in &snapshot.repos {
        repository_line(&mut out, repo);
    }
    out
}

/// Contact section with the relay warning and the status banner
pub fn contact(status: SubmissionStatus, relay_configured: bool) -> String {
    let language = use_language();
    let mut out = String::new();
    heading(&mut out, &language.t("contact.title"));
    let _ = writeln!(out, "{}", language.t("contact.subtitle"));

    if !relay_configured {
        let _ = writeln!(
            out,
            "! {}: {}",
            language.t("contact.modal.status.configWarning.title"),
            language.t("contact.modal.status.configWarning.description")
        );
    }
    if let (Some(title), Some(description)) = (status.banner_title_key(), status.banner_description_key()) {
        let _ = writeln!(out, "> {}: {}", language.t(title), language.t(description));
    }
    let submit_key = if status == SubmissionStatus::Submitting {
        "contact.modal.form.submitting"
    } else {
        "contact.modal.form.submit"
    };
    let _ = writeln!(out, "[{}]", language.t(submit_key));
    out
}

/// Footer with the theme toggle
pub fn footer(theme: Theme) -> String {
    let language = use_language();
    format!(
        "{} Rust · {} ({})\n",
        language.t("footer.madeWith"),
        language.t("theme.toggle"),
        language.t(theme.label_key())
    )
}
