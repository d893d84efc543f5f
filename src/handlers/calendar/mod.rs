//! Calendar handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Calendar routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(handler::sync_calendars))
        .route("/events", get(handler::list_events))
}
