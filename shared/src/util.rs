use chrono::{DateTime, Utc};

/// Whole seconds elapsed between `started_at` and `now`, clamped at zero
pub fn elapsed_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - started_at).num_seconds().max(0)
}

/// Render an elapsed duration the way the session cards show it.
///
/// Under a minute: `"45 сек"`; otherwise `M:SS` (`"2:05"`).
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        return format!("{} сек", seconds);
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Case-insensitive substring test; `needle` must already be lowercase
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}
