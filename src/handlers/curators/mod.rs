//! Curator rotation handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Curator rotation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assignments",
            get(handler::get_overview).post(handler::manual_assign),
        )
        .route("/assignments/auto", post(handler::auto_assign))
        .route("/assignments/{id}/skip", post(handler::toggle_skip))
        .route("/window", get(handler::get_window))
        // Rotation pool membership
        .route(
            "/pool/{profile_id}",
            delete(handler::remove_from_pool).post(handler::restore_to_pool),
        )
        .route(
            "/profiles/{profile_id}/assignments",
            delete(handler::purge_assignments),
        )
}
