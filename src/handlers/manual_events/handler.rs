//! Manual calendar event handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::ManualEventService,
    state::AppState,
};

use super::{
    request::{ManualEventRequest, ManualEventsQuery},
    response::{ManualEventResponse, ManualEventsResponse},
};

/// List manual events
pub async fn list_events(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<ManualEventsQuery>,
) -> AppResult<Json<ManualEventsResponse>> {
    let events = ManualEventService::list(state.db(), query).await?;
    Ok(Json(events))
}

/// Create a manual event
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ManualEventRequest>,
) -> AppResult<(StatusCode, Json<ManualEventResponse>)> {
    payload.validate()?;

    let event = ManualEventService::create(state.db(), &auth_user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update a manual event (creator or admin)
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ManualEventRequest>,
) -> AppResult<Json<ManualEventResponse>> {
    payload.validate()?;

    let event = ManualEventService::update(
        state.db(),
        &id,
        &auth_user.id,
        auth_user.is_admin(),
        payload,
    )
    .await?;
    Ok(Json(event))
}

/// Delete a manual event (creator or admin)
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ManualEventService::delete(state.db(), &id, &auth_user.id, auth_user.is_admin()).await?;
    Ok(StatusCode::NO_CONTENT)
}
