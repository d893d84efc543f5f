//! Manual calendar event repository

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ManualCalendarEvent, ManualEventFields},
};

/// Repository for hand-entered calendar events
pub struct ManualEventRepository;

impl ManualEventRepository {
    /// Events starting within `[from, to]`, ordered by start
    pub async fn list(
        pool: &PgPool,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<ManualCalendarEvent>> {
        let events = sqlx::query_as::<_, ManualCalendarEvent>(
            r#"
            SELECT * FROM manual_calendar_events
            WHERE ($1::date IS NULL OR start_date >= $1)
              AND ($2::date IS NULL OR start_date <= $2)
            ORDER BY start_date ASC, start_time ASC NULLS FIRST
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Find event by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<ManualCalendarEvent>> {
        let event = sqlx::query_as::<_, ManualCalendarEvent>(
            r#"SELECT * FROM manual_calendar_events WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Create a new event
    pub async fn create(
        pool: &PgPool,
        fields: &ManualEventFields,
        created_by: &Uuid,
    ) -> AppResult<ManualCalendarEvent> {
        let event = sqlx::query_as::<_, ManualCalendarEvent>(
            r#"
            INSERT INTO manual_calendar_events (
                title, description, start_date, start_time, end_date, end_time,
                location, is_all_day, color, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.start_date)
        .bind(fields.start_time)
        .bind(fields.end_date)
        .bind(fields.end_time)
        .bind(&fields.location)
        .bind(fields.is_all_day)
        .bind(&fields.color)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Replace an event's fields
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        fields: &ManualEventFields,
    ) -> AppResult<Option<ManualCalendarEvent>> {
        let event = sqlx::query_as::<_, ManualCalendarEvent>(
            r#"
            UPDATE manual_calendar_events
            SET
                title = $2,
                description = $3,
                start_date = $4,
                start_time = $5,
                end_date = $6,
                end_time = $7,
                location = $8,
                is_all_day = $9,
                color = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.start_date)
        .bind(fields.start_time)
        .bind(fields.end_date)
        .bind(fields.end_time)
        .bind(&fields.location)
        .bind(fields.is_all_day)
        .bind(&fields.color)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Delete an event
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM manual_calendar_events WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
