// Time-index locator - find the sample representing "now" in an hourly series
use chrono::{DateTime, DurationRound, NaiveDateTime, TimeDelta, Utc};

/// Distance assigned to timestamps that don't parse, so they only win when
/// nothing else in the series parses.
const UNPARSEABLE_DISTANCE: f64 = 1e18;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Locate the index of the current hour inside `timestamps`.
///
/// Tries an exact string match against `now` truncated to the hour
/// (`YYYY-MM-DDTHH:00:00Z`) first. Upstream series requested with an `auto`
/// timezone are shifted relative to UTC and never match exactly, so the
/// fallback picks the timestamp closest to that hour when everything is read
/// as naive wall-clock time. Ties go to the earliest index.
///
/// Returns 0 for an empty series; callers must check emptiness themselves
/// before trusting the index.
pub fn locate_current_index(timestamps: &[String], now: DateTime<Utc>) -> usize {
    if timestamps.is_empty() {
        return 0;
    }

    let hour = truncate_to_hour(now);
    let key = hour.format("%Y-%m-%dT%H:%M:%SZ").to_string();

    if let Some(position) = timestamps.iter().position(|t| *t == key) {
        return position.min(timestamps.len() - 1);
    }

    let reference = hour.naive_utc();
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;

    for (index, timestamp) in timestamps.iter().enumerate() {
        let distance = parse_naive(timestamp)
            .map(|instant| (instant - reference).num_seconds().unsigned_abs() as f64)
            .unwrap_or(UNPARSEABLE_DISTANCE);

        // Strict comparison keeps the first of equally distant samples.
        if distance < best_distance {
            best_index = index;
            best_distance = distance;
        }
    }

    best_index
}

fn truncate_to_hour(now: DateTime<Utc>) -> DateTime<Utc> {
    now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now)
}

/// Parse an upstream timestamp as a naive instant.
///
/// A trailing `Z` marks UTC and is stripped; anything else is taken as
/// already-naive local time. Explicit offsets such as `+02:00` are rejected.
fn parse_naive(timestamp: &str) -> Option<NaiveDateTime> {
    let naive = timestamp.strip_suffix('Z').unwrap_or(timestamp);

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
