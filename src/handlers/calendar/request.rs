//! Calendar request DTOs

use serde::Deserialize;

/// Sync query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SyncQuery {
    /// Comma separated calendar ids, defaults to the configured calendars
    pub calendar_ids: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`, defaults to now
    pub time_min: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`, defaults to the sync horizon
    pub time_max: Option<String>,
    pub max_results: Option<u32>,
}

/// Stored events query parameters
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// Comma separated calendar ids, all calendars when absent
    pub calendar_ids: Option<String>,
    pub time_min: Option<String>,
    pub time_max: Option<String>,
}
