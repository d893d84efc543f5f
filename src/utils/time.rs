//! Time utilities

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Today's date in UTC
pub fn today_utc() -> NaiveDate {
    now_utc().date_naive()
}

/// Parse a datetime string in ISO 8601 format
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Parse a range bound given either as RFC 3339 or as a plain date
/// (midnight UTC)
pub fn parse_range_bound(s: &str) -> Option<DateTime<Utc>> {
    parse_datetime(s).or_else(|| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    })
}

/// Resolve an optional `[time_min, time_max)` range.
///
/// Defaults to now through `default_days` from now.
pub fn resolve_range(
    time_min: Option<DateTime<Utc>>,
    time_max: Option<DateTime<Utc>>,
    default_days: i64,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let min = time_min.unwrap_or_else(now_utc);
    let max = time_max.unwrap_or_else(|| min + Duration::days(default_days));
    (min, max)
}
