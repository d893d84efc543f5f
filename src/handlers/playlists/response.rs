//! Playlist response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Playlist;

/// Playlist response
#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub curator: String,
    pub description: Option<String>,
    pub spotify_url: String,
    pub apple_playlist_url: Option<String>,
    pub cover_url: Option<String>,
    pub curator_photo_url: Option<String>,
    pub week_label: Option<String>,
    pub assignment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Playlist> for PlaylistResponse {
    fn from(p: Playlist) -> Self {
        Self {
            id: p.id,
            date: p.date,
            title: p.title,
            curator: p.curator,
            description: p.description,
            spotify_url: p.spotify_url,
            apple_playlist_url: p.apple_playlist_url,
            cover_url: p.cover_url,
            curator_photo_url: p.curator_photo_url,
            week_label: p.week_label,
            assignment_id: p.assignment_id,
            created_at: p.created_at,
        }
    }
}

/// Playlists list
#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<PlaylistResponse>,
}
