//! Calendar event models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event mirrored from a remote calendar
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SyncedCalendarEvent {
    pub id: Uuid,
    pub google_event_id: String,
    pub calendar_id: String,
    pub calendar_name: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    /// Set for timed events
    pub start_date_time: Option<DateTime<Utc>>,
    /// Set for all-day events
    pub start_date: Option<NaiveDate>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub is_all_day: bool,
    pub content_hash: String,
    pub last_synced_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The part of a stored event the reconciler compares against
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredEventDigest {
    pub google_event_id: String,
    pub content_hash: String,
    /// Soft-deleted rows come back when the remote event reappears
    pub is_deleted: bool,
}

/// Event entered by hand in the dashboard
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ManualCalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_date: NaiveDate,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub is_all_day: bool,
    pub color: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ManualCalendarEvent {
    /// Whether `user_id` created this event
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by == Some(user_id)
    }
}

/// Validated fields of a manual event, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEventFields {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_date: NaiveDate,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub is_all_day: bool,
    pub color: Option<String>,
}
