//! Manual calendar event service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::ManualEventRepository,
    error::{AppError, AppResult},
    handlers::manual_events::{
        request::{ManualEventRequest, ManualEventsQuery},
        response::{ManualEventResponse, ManualEventsResponse},
    },
    models::{ManualCalendarEvent, ManualEventFields},
    utils::{
        time::parse_range_bound,
        validation::{non_blank, require_fields},
    },
};

/// Manual event service for business logic
pub struct ManualEventService;

impl ManualEventService {
    /// Events whose start date falls in the requested range
    pub async fn list(pool: &PgPool, query: ManualEventsQuery) -> AppResult<ManualEventsResponse> {
        let bound = |name: &str, raw: Option<&str>| match raw {
            Some(raw) => parse_range_bound(raw)
                .map(|dt| Some(dt.date_naive()))
                .ok_or_else(|| AppError::Validation(format!("Invalid {name}: {raw}"))),
            None => Ok(None),
        };

        let from = bound("time_min", query.time_min.as_deref())?;
        let to = bound("time_max", query.time_max.as_deref())?;

        let events = ManualEventRepository::list(pool, from, to).await?;

        Ok(ManualEventsResponse {
            events: events.into_iter().map(Into::into).collect(),
        })
    }

    /// Create an event owned by `created_by`
    pub async fn create(
        pool: &PgPool,
        created_by: &Uuid,
        payload: ManualEventRequest,
    ) -> AppResult<ManualEventResponse> {
        let fields = event_fields(payload)?;
        let event = ManualEventRepository::create(pool, &fields, created_by).await?;

        tracing::info!(event_id = %event.id, created_by = %created_by, "Manual event created");

        Ok(event.into())
    }

    /// Replace an event's fields; owner or admin only
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        user_id: &Uuid,
        is_admin: bool,
        payload: ManualEventRequest,
    ) -> AppResult<ManualEventResponse> {
        let existing = Self::find(pool, id).await?;
        ensure_can_modify(&existing, user_id, is_admin)?;

        let fields = event_fields(payload)?;
        let event = ManualEventRepository::update(pool, id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        tracing::info!(event_id = %event.id, updated_by = %user_id, "Manual event updated");

        Ok(event.into())
    }

    /// Delete an event; owner or admin only
    pub async fn delete(pool: &PgPool, id: &Uuid, user_id: &Uuid, is_admin: bool) -> AppResult<()> {
        let existing = Self::find(pool, id).await?;
        ensure_can_modify(&existing, user_id, is_admin)?;

        if !ManualEventRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        tracing::info!(event_id = %id, deleted_by = %user_id, "Manual event deleted");

        Ok(())
    }

    async fn find(pool: &PgPool, id: &Uuid) -> AppResult<ManualCalendarEvent> {
        ManualEventRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }
}

fn ensure_can_modify(event: &ManualCalendarEvent, user_id: &Uuid, is_admin: bool) -> AppResult<()> {
    if is_admin || event.is_owned_by(*user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the creator or an admin can change this event".to_string(),
        ))
    }
}

/// Validate a request into storable fields
fn event_fields(payload: ManualEventRequest) -> AppResult<ManualEventFields> {
    let title = non_blank(payload.title.as_deref()).map(str::to_string);
    require_fields(&[
        ("title", title.is_some()),
        ("start_date", payload.start_date.is_some()),
    ])?;
    let (Some(title), Some(start_date)) = (title, payload.start_date) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let end_date = payload.end_date.unwrap_or(start_date);
    if end_date < start_date {
        return Err(AppError::Validation(
            "end_date cannot be before start_date".to_string(),
        ));
    }

    // Times carry no meaning on all-day events
    let (start_time, end_time) = if payload.is_all_day {
        (None, None)
    } else {
        (payload.start_time, payload.end_time)
    };
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end_date == start_date && end < start {
            return Err(AppError::Validation(
                "end_time cannot be before start_time".to_string(),
            ));
        }
    }

    Ok(ManualEventFields {
        title,
        description: non_blank(payload.description.as_deref()).map(str::to_string),
        start_date,
        start_time,
        end_date,
        end_time,
        location: non_blank(payload.location.as_deref()).map(str::to_string),
        is_all_day: payload.is_all_day,
        color: payload.color,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Utc};
    use validator::Validate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request() -> ManualEventRequest {
        ManualEventRequest {
            title: Some(" Team lunch ".into()),
            start_date: Some(date(2024, 3, 1)),
            ..Default::default()
        }
    }

    fn event(created_by: Option<Uuid>) -> ManualCalendarEvent {
        ManualCalendarEvent {
            id: Uuid::new_v4(),
            title: "Team lunch".into(),
            description: None,
            start_date: date(2024, 3, 1),
            start_time: None,
            end_date: date(2024, 3, 1),
            end_time: None,
            location: None,
            is_all_day: true,
            color: None,
            created_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_end_date_defaults_to_start_date() {
        let fields = event_fields(request()).unwrap();
        assert_eq!(fields.title, "Team lunch");
        assert_eq!(fields.end_date, date(2024, 3, 1));
    }

    #[test]
    fn test_missing_title_and_start_date_listed_together() {
        let payload = ManualEventRequest {
            title: Some("   ".into()),
            ..Default::default()
        };
        match event_fields(payload) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["title", "start_date"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_end_before_start_rejected() {
        let payload = ManualEventRequest {
            end_date: Some(date(2024, 2, 28)),
            ..request()
        };
        assert!(matches!(event_fields(payload), Err(AppError::Validation(_))));

        let payload = ManualEventRequest {
            start_time: Some(time(14, 0)),
            end_time: Some(time(13, 0)),
            ..request()
        };
        assert!(matches!(event_fields(payload), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_all_day_drops_times() {
        let payload = ManualEventRequest {
            is_all_day: true,
            start_time: Some(time(14, 0)),
            end_time: Some(time(13, 0)),
            ..request()
        };
        let fields = event_fields(payload).unwrap();
        assert_eq!((fields.start_time, fields.end_time), (None, None));
    }

    #[test]
    fn test_color_must_be_hex() {
        let payload = ManualEventRequest {
            color: Some("blue".into()),
            ..request()
        };
        assert!(payload.validate().is_err());

        let payload = ManualEventRequest {
            color: Some("#3366ff".into()),
            ..request()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_only_owner_or_admin_can_modify() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let owned = event(Some(owner));

        assert!(ensure_can_modify(&owned, &owner, false).is_ok());
        assert!(ensure_can_modify(&owned, &stranger, true).is_ok());
        assert!(matches!(
            ensure_can_modify(&owned, &stranger, false),
            Err(AppError::Forbidden(_))
        ));
        assert!(ensure_can_modify(&event(None), &stranger, false).is_err());
    }
}
