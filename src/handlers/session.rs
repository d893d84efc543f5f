//! Session handlers

use axum::{Json, Router, routing::get};

use crate::{middleware::auth::AuthenticatedUser, state::AppState};

/// The signed-in user with their resolved permissions.
///
/// The dashboard gates its admin pages (users, torch passing) on these flags.
async fn current_user(auth_user: AuthenticatedUser) -> Json<AuthenticatedUser> {
    Json(auth_user)
}

/// Create session routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(current_user))
}
