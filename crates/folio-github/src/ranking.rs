//! Language breakdown and showcase ordering

use crate::types::{LanguageShare, Repository};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Languages kept per repository
pub const MAX_LANGUAGES: usize = 5;

/// Turn a `/languages` byte map into rounded percentages, largest first
///
/// Returns an empty list when the map holds no bytes.
pub fn language_shares(bytes: &BTreeMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = bytes.values().sum();
    if total == 0 {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut shares: Vec<(u64, LanguageShare)> = bytes
        .iter()
        .map(|(name, &count)| {
            let percentage = (count as f64 / total as f64 * 100.0).round() as u8;
            (count, LanguageShare::new(name.clone(), percentage))
        })
        .collect();

    shares.sort_by(|(a_bytes, a), (b_bytes, b)| {
        b.percentage.cmp(&a.percentage).then_with(|| b_bytes.cmp(a_bytes))
    });
    shares.truncate(MAX_LANGUAGES);
    shares.into_iter().map(|(_, share)| share).collect()
}

/// Breakdown used when the language call fails: the primary language at 100%
pub fn primary_language_share(language: Option<&str>) -> Vec<LanguageShare> {
    language
        .map(|name| vec![LanguageShare::new(name, 100)])
        .unwrap_or_default()
}

/// Twice the star count plus the update time in epoch milliseconds over 1e9
#[allow(clippy::cast_precision_loss)]
pub fn showcase_score(repo: &Repository) -> f64 {
    f64::from(repo.stargazers_count) * 2.0 + repo.updated_at.timestamp_millis() as f64 / 1e9
}

/// Order repositories by descending [`showcase_score`]
pub fn sort_for_showcase(repos: &mut [Repository]) {
    repos.sort_by(|a, b| {
        showcase_score(b)
            .partial_cmp(&showcase_score(a))
            .unwrap_or(Ordering::Equal)
    });
}
