//! Manual event response DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::ManualCalendarEvent;

/// Manual event response
#[derive(Debug, Serialize)]
pub struct ManualEventResponse {
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

impl From<ManualCalendarEvent> for ManualEventResponse {
    fn from(e: ManualCalendarEvent) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            start_date: e.start_date,
            start_time: e.start_time,
            end_date: e.end_date,
            end_time: e.end_time,
            location: e.location,
            is_all_day: e.is_all_day,
            color: e.color,
            created_by: e.created_by,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Manual events list
#[derive(Debug, Serialize)]
pub struct ManualEventsResponse {
    pub events: Vec<ManualEventResponse>,
}
