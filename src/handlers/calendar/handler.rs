//! Calendar handler implementations

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::CalendarService,
    state::AppState,
};

use super::{
    request::{EventsQuery, SyncQuery},
    response::{CalendarEventsResponse, SyncResponse},
};

/// Reconcile remote calendars into the local mirror
pub async fn sync_calendars(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<SyncQuery>,
) -> AppResult<Json<SyncResponse>> {
    auth_user.ensure(|p| p.can_manage_calendar, "sync calendars")?;

    let response = CalendarService::sync(&state, query).await?;
    Ok(Json(response))
}

/// Stored events in a range
pub async fn list_events(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<EventsQuery>,
) -> AppResult<Json<CalendarEventsResponse>> {
    let response =
        CalendarService::list_events(state.db(), &state.config().calendar, query).await?;
    Ok(Json(response))
}
