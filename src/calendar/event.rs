//! Normalized remote calendar events

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::constants::UNTITLED_EVENT_SUMMARY;
use crate::utils::hash::hash_fields;

static PENDING_APPROVAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[Pending approval\] ").expect("valid prefix pattern"));

/// An event as fetched from the provider, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEvent {
    pub google_event_id: String,
    pub calendar_id: String,
    pub calendar_name: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub start_date: Option<NaiveDate>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub is_all_day: bool,
}

impl RemoteEvent {
    /// Hash of every stored field, used to detect upstream edits
    pub fn content_hash(&self) -> String {
        let start_date_time = self.start_date_time.map(|t| t.to_rfc3339());
        let end_date_time = self.end_date_time.map(|t| t.to_rfc3339());
        let start_date = self.start_date.map(|d| d.to_string());
        let end_date = self.end_date.map(|d| d.to_string());
        let is_all_day = if self.is_all_day { "1" } else { "0" };

        hash_fields([
            self.calendar_name.as_deref(),
            Some(self.summary.as_str()),
            self.description.as_deref(),
            start_date_time.as_deref(),
            start_date.as_deref(),
            end_date_time.as_deref(),
            end_date.as_deref(),
            self.location.as_deref(),
            Some(is_all_day),
        ])
    }
}

/// Display summary for a remote event.
///
/// Untitled events get a placeholder; out-of-office calendars drop the
/// approval prefix their tooling adds.
pub fn normalize_summary(raw: Option<&str>, out_of_office: bool) -> String {
    let summary = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return UNTITLED_EVENT_SUMMARY.to_string(),
    };

    if out_of_office {
        PENDING_APPROVAL_PREFIX.replace(summary, "").into_owned()
    } else {
        summary.to_string()
    }
}
