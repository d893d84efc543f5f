//! Calendar response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{calendar::ReconcileCounts, models::SyncedCalendarEvent};

/// Result of syncing one calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarSyncReport {
    pub calendar_id: String,
    pub calendar_name: Option<String>,
    #[serde(flatten)]
    pub counts: ReconcileCounts,
    /// Not every event in the range was fetched; deletions were skipped
    pub truncated: bool,
}

/// Calendar that could not be synced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCalendar {
    pub calendar_id: String,
    pub reason: String,
}

/// Sync result across calendars
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub synced: usize,
    pub failed: usize,
    /// Totals over the synced calendars
    #[serde(flatten)]
    pub totals: ReconcileCounts,
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub calendars: Vec<CalendarSyncReport>,
    pub failed_calendars: Vec<FailedCalendar>,
}

impl SyncResponse {
    pub fn new(
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        calendars: Vec<CalendarSyncReport>,
        failed_calendars: Vec<FailedCalendar>,
    ) -> Self {
        let mut totals = ReconcileCounts::default();
        for report in &calendars {
            totals += report.counts;
        }

        Self {
            synced: calendars.len(),
            failed: failed_calendars.len(),
            totals,
            time_min,
            time_max,
            calendars,
            failed_calendars,
        }
    }
}

/// Stored calendar event
#[derive(Debug, Serialize)]
pub struct CalendarEventResponse {
    pub id: Uuid,
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
    pub last_synced_at: DateTime<Utc>,
}

impl From<SyncedCalendarEvent> for CalendarEventResponse {
    fn from(e: SyncedCalendarEvent) -> Self {
        Self {
            id: e.id,
            google_event_id: e.google_event_id,
            calendar_id: e.calendar_id,
            calendar_name: e.calendar_name,
            summary: e.summary,
            description: e.description,
            start_date_time: e.start_date_time,
            start_date: e.start_date,
            end_date_time: e.end_date_time,
            end_date: e.end_date,
            location: e.location,
            is_all_day: e.is_all_day,
            last_synced_at: e.last_synced_at,
        }
    }
}

/// Stored events in a range
#[derive(Debug, Serialize)]
pub struct CalendarEventsResponse {
    pub events: Vec<CalendarEventResponse>,
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
}
