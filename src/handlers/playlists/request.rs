//! Playlist request DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_CURATOR_NAME_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_EVENT_TITLE_LENGTH, MAX_URL_LENGTH};

/// Playlist list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistsQuery {
    pub limit: Option<i64>,
}

/// Create playlist request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePlaylistRequest {
    pub date: Option<NaiveDate>,

    #[validate(length(max = MAX_EVENT_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_CURATOR_NAME_LENGTH))]
    pub curator: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(url, length(max = MAX_URL_LENGTH))]
    pub spotify_url: Option<String>,

    #[validate(url, length(max = MAX_URL_LENGTH))]
    pub apple_playlist_url: Option<String>,

    #[validate(url, length(max = MAX_URL_LENGTH))]
    pub cover_url: Option<String>,

    #[validate(url, length(max = MAX_URL_LENGTH))]
    pub curator_photo_url: Option<String>,

    pub week_label: Option<String>,
}
