//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod calendar;
pub mod curators;
pub mod health;
pub mod manual_events;
pub mod playlists;
pub mod session;

use axum::{Router, middleware};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/curators", curators::routes())
        .nest("/calendar", calendar::routes())
        .nest("/manual-events", manual_events::routes())
        .nest("/playlists", playlists::routes())
        .merge(session::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(protected)
}
