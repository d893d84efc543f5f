//! Synced calendar event repository

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::{
    calendar::RemoteEvent,
    error::AppResult,
    models::{StoredEventDigest, SyncedCalendarEvent},
};

/// Repository for mirrored calendar events
pub struct CalendarEventRepository;

impl CalendarEventRepository {
    /// Digests the reconciler compares a fetch against: live rows of the
    /// calendar overlapping the window, plus any row whose id was fetched
    /// (so soft-deleted rows can be restored).
    pub async fn digests_for_sync<'e, E: PgExecutor<'e>>(
        executor: E,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        fetched_ids: &[String],
    ) -> AppResult<Vec<StoredEventDigest>> {
        let digests = sqlx::query_as::<_, StoredEventDigest>(
            r#"
            SELECT google_event_id, content_hash, deleted_at IS NOT NULL AS is_deleted
            FROM synced_calendar_events
            WHERE calendar_id = $1
              AND (
                (
                  deleted_at IS NULL
                  AND COALESCE(start_date_time, start_date::timestamptz) < $3
                  AND COALESCE(
                        end_date_time, end_date::timestamptz,
                        start_date_time, start_date::timestamptz
                      ) > $2
                )
                OR google_event_id = ANY($4)
              )
            "#,
        )
        .bind(calendar_id)
        .bind(time_min)
        .bind(time_max)
        .bind(fetched_ids)
        .fetch_all(executor)
        .await?;

        Ok(digests)
    }

    /// Insert or overwrite an event, clearing any soft delete
    pub async fn upsert<'e, E: PgExecutor<'e>>(executor: E, event: &RemoteEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO synced_calendar_events (
                google_event_id, calendar_id, calendar_name, summary, description,
                start_date_time, start_date, end_date_time, end_date,
                location, is_all_day, content_hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (calendar_id, google_event_id) DO UPDATE SET
                calendar_name = EXCLUDED.calendar_name,
                summary = EXCLUDED.summary,
                description = EXCLUDED.description,
                start_date_time = EXCLUDED.start_date_time,
                start_date = EXCLUDED.start_date,
                end_date_time = EXCLUDED.end_date_time,
                end_date = EXCLUDED.end_date,
                location = EXCLUDED.location,
                is_all_day = EXCLUDED.is_all_day,
                content_hash = EXCLUDED.content_hash,
                last_synced_at = NOW(),
                updated_at = NOW(),
                deleted_at = NULL
            "#,
        )
        .bind(&event.google_event_id)
        .bind(&event.calendar_id)
        .bind(&event.calendar_name)
        .bind(&event.summary)
        .bind(&event.description)
        .bind(event.start_date_time)
        .bind(event.start_date)
        .bind(event.end_date_time)
        .bind(event.end_date)
        .bind(&event.location)
        .bind(event.is_all_day)
        .bind(event.content_hash())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Refresh the sync timestamp of unchanged events
    pub async fn touch<'e, E: PgExecutor<'e>>(
        executor: E,
        calendar_id: &str,
        google_event_ids: &[String],
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE synced_calendar_events
            SET last_synced_at = NOW()
            WHERE calendar_id = $1 AND google_event_id = ANY($2)
            "#,
        )
        .bind(calendar_id)
        .bind(google_event_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mark events as deleted upstream
    pub async fn soft_delete<'e, E: PgExecutor<'e>>(
        executor: E,
        calendar_id: &str,
        google_event_ids: &[String],
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE synced_calendar_events
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE calendar_id = $1
              AND google_event_id = ANY($2)
              AND deleted_at IS NULL
            "#,
        )
        .bind(calendar_id)
        .bind(google_event_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Live events overlapping a range, earliest first.
    ///
    /// An empty `calendar_ids` means every calendar.
    pub async fn list_live(
        pool: &PgPool,
        calendar_ids: &[String],
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> AppResult<Vec<SyncedCalendarEvent>> {
        let events = sqlx::query_as::<_, SyncedCalendarEvent>(
            r#"
            SELECT * FROM synced_calendar_events
            WHERE deleted_at IS NULL
              AND (cardinality($1::text[]) = 0 OR calendar_id = ANY($1))
              AND COALESCE(start_date_time, start_date::timestamptz) < $3
              AND COALESCE(
                    end_date_time, end_date::timestamptz,
                    start_date_time, start_date::timestamptz
                  ) > $2
            ORDER BY COALESCE(start_date_time, start_date::timestamptz) ASC, summary ASC
            "#,
        )
        .bind(calendar_ids)
        .bind(time_min)
        .bind(time_max)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }
}
