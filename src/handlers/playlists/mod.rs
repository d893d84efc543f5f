//! Playlist handlers

mod handler;
pub mod request;
pub mod response;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Playlist routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_playlists).post(handler::create_playlist))
}
