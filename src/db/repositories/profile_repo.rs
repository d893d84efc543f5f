//! Profile repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Profile, TeamMember},
};

/// Repository for profile database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Find profile by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(r#"SELECT * FROM profiles WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(profile)
    }

    /// Whole roster, ordered by name
    pub async fn list_team_members<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> AppResult<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, full_name, email, discipline, slack_user_id, is_active, rotation_excluded
            FROM profiles
            ORDER BY full_name ASC, id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(members)
    }

    /// Set or clear the rotation exclusion flag
    pub async fn set_rotation_excluded<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        excluded: bool,
    ) -> AppResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET rotation_excluded = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(excluded)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }

    /// Avatar of a profile whose name or email contains `identifier`
    pub async fn find_avatar(pool: &PgPool, identifier: &str) -> AppResult<Option<String>> {
        let pattern = format!("%{}%", identifier.trim());

        let avatar = sqlx::query_scalar::<_, String>(
            r#"
            SELECT avatar_url FROM profiles
            WHERE avatar_url IS NOT NULL
              AND (full_name ILIKE $1 OR email ILIKE $1)
            ORDER BY is_active DESC
            LIMIT 1
            "#,
        )
        .bind(pattern)
        .fetch_optional(pool)
        .await?;

        Ok(avatar)
    }
}
