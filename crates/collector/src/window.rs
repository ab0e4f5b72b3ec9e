//! Capture-window gate.
//!
//! Sampling is permitted only between the optional configured bounds. A
//! bound that fails to parse is ignored rather than failing the check,
//! so a typo in one bound degrades to "that bound absent" instead of
//! halting capture.

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 bound. `None` when absent or malformed.
fn parse_bound(bound: Option<&str>) -> Option<DateTime<Utc>> {
    bound
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Decide whether `now` falls inside the optional capture window.
///
/// No bounds configured means capture always proceeds.
pub fn in_window(now: DateTime<Utc>, start: Option<&str>, end: Option<&str>) -> bool {
    if let Some(start) = parse_bound(start) {
        if now < start {
            return false;
        }
    }
    if let Some(end) = parse_bound(end) {
        if now > end {
            return false;
        }
    }
    true
}
