//! Playlist model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Playlist published by a curator
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Playlist {
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
    /// Assignment this playlist was curated for
    pub assignment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a playlist
#[derive(Debug, Clone)]
pub struct NewPlaylist {
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
}
