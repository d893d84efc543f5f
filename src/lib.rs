//! Teamdeck - Team culture dashboard backend
//!
//! This library provides the server side of the team dashboard: the weekly
//! playlist curator rotation, a mirror of the team's Google calendars,
//! hand-entered events and the playlist archive.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//!
//! Decisions that need no I/O live in their own modules: [`rotation`] picks
//! curators and [`calendar::reconcile`] diffs calendar fetches. Outbound
//! integrations sit behind traits ([`calendar::CalendarSource`],
//! [`notify::Notifier`]).

pub mod calendar;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod rotation;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use std::time::Duration;

use axum::{Router, middleware as axum_middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::constants::MAX_REQUEST_BODY_BYTES;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .nest("/api/v1", handlers::routes(state.clone()))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
