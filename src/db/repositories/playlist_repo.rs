//! Playlist repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{NewPlaylist, Playlist},
};

/// Repository for playlist database operations
pub struct PlaylistRepository;

impl PlaylistRepository {
    /// Most recent playlists first
    pub async fn list(pool: &PgPool, limit: i64) -> AppResult<Vec<Playlist>> {
        let playlists = sqlx::query_as::<_, Playlist>(
            r#"SELECT * FROM playlists ORDER BY date DESC, created_at DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(playlists)
    }

    /// Create a new playlist
    pub async fn create(pool: &PgPool, new: &NewPlaylist) -> AppResult<Playlist> {
        let playlist = sqlx::query_as::<_, Playlist>(
            r#"
            INSERT INTO playlists (
                date, title, curator, description, spotify_url, apple_playlist_url,
                cover_url, curator_photo_url, week_label, assignment_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.date)
        .bind(&new.title)
        .bind(&new.curator)
        .bind(&new.description)
        .bind(&new.spotify_url)
        .bind(&new.apple_playlist_url)
        .bind(&new.cover_url)
        .bind(&new.curator_photo_url)
        .bind(&new.week_label)
        .bind(new.assignment_id)
        .fetch_one(pool)
        .await?;

        Ok(playlist)
    }
}
