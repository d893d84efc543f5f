//! Playlist handler implementations

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::PlaylistService,
    state::AppState,
};

use super::{
    request::{CreatePlaylistRequest, PlaylistsQuery},
    response::{PlaylistResponse, PlaylistsResponse},
};

/// List playlists, newest first
pub async fn list_playlists(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<PlaylistsQuery>,
) -> AppResult<Json<PlaylistsResponse>> {
    let playlists = PlaylistService::list(state.db(), query).await?;
    Ok(Json(playlists))
}

/// Publish a playlist
pub async fn create_playlist(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreatePlaylistRequest>,
) -> AppResult<(StatusCode, Json<PlaylistResponse>)> {
    auth_user.ensure(|p| p.can_manage_playlists, "manage playlists")?;
    payload.validate()?;

    let playlist = PlaylistService::create(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}
