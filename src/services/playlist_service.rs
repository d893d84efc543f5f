//! Playlist service

use sqlx::PgPool;

use crate::{
    constants::{DEFAULT_PLAYLIST_LIMIT, MAX_PLAYLIST_LIMIT},
    db::repositories::{AssignmentRepository, PlaylistRepository, ProfileRepository},
    error::{AppError, AppResult},
    handlers::playlists::{
        request::{CreatePlaylistRequest, PlaylistsQuery},
        response::{PlaylistResponse, PlaylistsResponse},
    },
    models::NewPlaylist,
    utils::validation::{non_blank, require_fields},
};

/// Playlist service for business logic
pub struct PlaylistService;

impl PlaylistService {
    /// Newest playlists first
    pub async fn list(pool: &PgPool, query: PlaylistsQuery) -> AppResult<PlaylistsResponse> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PLAYLIST_LIMIT)
            .clamp(1, MAX_PLAYLIST_LIMIT);

        let playlists = PlaylistRepository::list(pool, limit).await?;

        Ok(PlaylistsResponse {
            playlists: playlists.into_iter().map(Into::into).collect(),
        })
    }

    /// Publish a playlist.
    ///
    /// Without a photo the curator's profile avatar is used. The playlist is
    /// linked to the curator's assignment covering its date, if any.
    pub async fn create(pool: &PgPool, payload: CreatePlaylistRequest) -> AppResult<PlaylistResponse> {
        let mut new = new_playlist(payload)?;

        if new.curator_photo_url.is_none() {
            new.curator_photo_url = ProfileRepository::find_avatar(pool, &new.curator).await?;
        }

        new.assignment_id = AssignmentRepository::find_for_playlist(pool, new.date, &new.curator)
            .await?
            .map(|assignment| assignment.id);

        let playlist = PlaylistRepository::create(pool, &new).await?;

        tracing::info!(
            playlist_id = %playlist.id,
            curator = %playlist.curator,
            assignment_id = ?playlist.assignment_id,
            "Playlist created"
        );

        Ok(playlist.into())
    }
}

fn new_playlist(payload: CreatePlaylistRequest) -> AppResult<NewPlaylist> {
    let owned = |value: Option<String>| non_blank(value.as_deref()).map(str::to_string);

    let curator = owned(payload.curator);
    let spotify_url = owned(payload.spotify_url);
    require_fields(&[
        ("date", payload.date.is_some()),
        ("curator", curator.is_some()),
        ("spotify_url", spotify_url.is_some()),
    ])?;
    let (Some(date), Some(curator), Some(spotify_url)) = (payload.date, curator, spotify_url) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    Ok(NewPlaylist {
        date,
        title: owned(payload.title),
        curator,
        description: owned(payload.description),
        spotify_url,
        apple_playlist_url: owned(payload.apple_playlist_url),
        cover_url: owned(payload.cover_url),
        curator_photo_url: owned(payload.curator_photo_url),
        week_label: owned(payload.week_label),
        assignment_id: None,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use validator::Validate;

    use super::*;

    #[test]
    fn test_missing_fields_listed_by_name() {
        let payload = CreatePlaylistRequest {
            curator: Some("Ada".into()),
            spotify_url: Some("  ".into()),
            ..Default::default()
        };
        match new_playlist(payload) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["date", "spotify_url"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_blank_optionals_are_dropped() {
        let payload = CreatePlaylistRequest {
            date: NaiveDate::from_ymd_opt(2024, 1, 5),
            curator: Some(" Ada Lovelace ".into()),
            spotify_url: Some("https://open.spotify.com/playlist/abc".into()),
            curator_photo_url: Some("".into()),
            title: Some("Deep focus".into()),
            ..Default::default()
        };

        let new = new_playlist(payload).unwrap();
        assert_eq!(new.curator, "Ada Lovelace");
        assert_eq!(new.title.as_deref(), Some("Deep focus"));
        assert!(new.curator_photo_url.is_none());
        assert!(new.assignment_id.is_none());
    }

    #[test]
    fn test_urls_are_validated() {
        let payload = CreatePlaylistRequest {
            spotify_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }
}
