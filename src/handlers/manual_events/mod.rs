//! Manual calendar event handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Manual event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_events).post(handler::create_event))
        .route("/{id}", put(handler::update_event).delete(handler::delete_event))
}
