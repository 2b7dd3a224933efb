//! Small text and time helpers shared by the site renderer.

use chrono::{DateTime, Utc};

/// Formats a timestamp as a calendar date for display.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Truncates a string to at most `max_chars` characters, ending with an ellipsis.
///
/// Counts characters rather than bytes so accented Spanish copy is never split
/// inside a code point.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let kept: String = input.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Returns `None` for empty or whitespace-only strings.
pub fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}
