//! Curator assignment repository

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    constants::AUTO_ASSIGN_LOCK_KEY,
    error::AppResult,
    models::{AssignmentWithPlaylist, CuratorAssignment, NewAssignment},
};

/// Repository for curator assignment database operations
pub struct AssignmentRepository;

impl AssignmentRepository {
    /// Take the transaction-scoped lock serializing auto-assignments.
    ///
    /// Released automatically on commit or rollback.
    pub async fn lock_auto_assign<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(AUTO_ASSIGN_LOCK_KEY)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Full assignment history, oldest first
    pub async fn list_history<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> AppResult<Vec<CuratorAssignment>> {
        let assignments = sqlx::query_as::<_, CuratorAssignment>(
            r#"SELECT * FROM curator_assignments ORDER BY assignment_date ASC, created_at ASC"#,
        )
        .fetch_all(executor)
        .await?;

        Ok(assignments)
    }

    /// Assignments with their playlist, newest window first.
    ///
    /// `from` / `to` bound the window start date (inclusive).
    pub async fn list_with_playlists(
        pool: &PgPool,
        limit: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AssignmentWithPlaylist>> {
        let rows = sqlx::query_as::<_, AssignmentWithPlaylist>(
            r#"
            SELECT
                a.*,
                p.id AS playlist_id,
                p.title AS playlist_title,
                p.spotify_url AS playlist_spotify_url
            FROM curator_assignments a
            LEFT JOIN playlists p ON p.assignment_id = a.id
            WHERE ($1::date IS NULL OR a.start_date >= $1)
              AND ($2::date IS NULL OR a.start_date <= $2)
            ORDER BY a.start_date DESC, a.created_at DESC
            LIMIT $3
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new assignment
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        new: &NewAssignment,
    ) -> AppResult<CuratorAssignment> {
        let assignment = sqlx::query_as::<_, CuratorAssignment>(
            r#"
            INSERT INTO curator_assignments (
                assignment_date, curator_name, curator_profile_id,
                start_date, end_date, is_manual_override, assigned_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.assignment_date)
        .bind(&new.curator_name)
        .bind(new.curator_profile_id)
        .bind(new.window.start_date)
        .bind(new.window.end_date)
        .bind(new.is_manual_override)
        .bind(new.assigned_by)
        .fetch_one(executor)
        .await?;

        Ok(assignment)
    }

    /// Flip the skipped flag in place
    pub async fn toggle_skip(pool: &PgPool, id: &Uuid) -> AppResult<Option<CuratorAssignment>> {
        let assignment = sqlx::query_as::<_, CuratorAssignment>(
            r#"
            UPDATE curator_assignments
            SET skipped = NOT skipped, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    /// Delete a profile's assignments whose window starts after `today`
    pub async fn delete_upcoming_for_profile<'e, E: PgExecutor<'e>>(
        executor: E,
        profile_id: &Uuid,
        today: NaiveDate,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM curator_assignments
            WHERE curator_profile_id = $1 AND start_date > $2
            "#,
        )
        .bind(profile_id)
        .bind(today)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete every assignment of a profile
    pub async fn delete_all_for_profile(pool: &PgPool, profile_id: &Uuid) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM curator_assignments WHERE curator_profile_id = $1"#)
            .bind(profile_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Non-skipped assignment whose window contains `date` and whose curator
    /// name matches (trimmed, case-insensitive)
    pub async fn find_for_playlist(
        pool: &PgPool,
        date: NaiveDate,
        curator_name: &str,
    ) -> AppResult<Option<CuratorAssignment>> {
        let assignment = sqlx::query_as::<_, CuratorAssignment>(
            r#"
            SELECT * FROM curator_assignments
            WHERE NOT skipped
              AND start_date <= $1
              AND end_date > $1
              AND LOWER(TRIM(curator_name)) = LOWER(TRIM($2))
            ORDER BY assignment_date DESC
            LIMIT 1
            "#,
        )
        .bind(date)
        .bind(curator_name)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }
}
