//! Timestamp arithmetic for `tested_date` values.
//!
//! A missing timestamp carries no ordering information. Gaps involving one are
//! reported as zero so that such pairs look simultaneous and end up in front
//! of a human instead of being auto-resolved.

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Absolute gap between two timestamps in fractional hours.
///
/// Returns `0.0` unless both timestamps are present.
pub fn hours_between(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).num_milliseconds().abs() as f64 / MILLIS_PER_HOUR,
        _ => 0.0,
    }
}

/// Returns `true` only if both timestamps are present and `a` is strictly
/// after `b`.
pub fn is_later(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}
