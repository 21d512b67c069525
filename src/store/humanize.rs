//! Human-scaled byte counts and durations for display fields.

use chrono::Duration;

/// Decimal units: `999 B`, `1 kB`, `2 MB`.
pub fn humanize_bytes(bytes: u64) -> String {
    if bytes < 1_000 {
        format!("{} B", bytes)
    } else if bytes < 1_000_000 {
        format!("{} kB", bytes / 1_000)
    } else {
        format!("{} MB", bytes / 1_000_000)
    }
}

/// Whole milliseconds below one second, whole seconds below one minute,
/// whole minutes beyond. Negative spans (clock skew) clamp to zero.
pub fn humanize_duration(duration: Duration) -> String {
    let millis = duration.num_milliseconds().max(0);
    if millis < 1_000 {
        format!("{} ms", millis)
    } else if millis < 60_000 {
        format!("{} s", millis / 1_000)
    } else {
        format!("{} min", millis / 60_000)
    }
}
