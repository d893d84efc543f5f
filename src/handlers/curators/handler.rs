//! Curator rotation handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::Permissions,
    services::CuratorService,
    state::AppState,
    utils::time::today_utc,
};

use super::{
    request::{AssignmentsQuery, AutoAssignRequest, ManualAssignRequest, WindowQuery},
    response::{
        AssignmentResponse, AutoAssignResponse, ManualAssignResponse, OverviewResponse,
        PoolRemovalResponse, PoolRestoreResponse, PurgeResponse, WindowResponse,
    },
};

fn can_manage_curators(p: &Permissions) -> bool {
    p.can_manage_curators
}

/// Assignment history, fairness counts and roster
pub async fn get_overview(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<AssignmentsQuery>,
) -> AppResult<Json<OverviewResponse>> {
    let overview = CuratorService::overview(state.db(), query).await?;
    Ok(Json(overview))
}

/// Preview the curation window of an assignment date
pub async fn get_window(
    _auth_user: AuthenticatedUser,
    Query(query): Query<WindowQuery>,
) -> Json<WindowResponse> {
    Json(CuratorService::window(query.date.unwrap_or_else(today_utc)))
}

/// Select and record the next curator
pub async fn auto_assign(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Option<Json<AutoAssignRequest>>,
) -> AppResult<(StatusCode, Json<AutoAssignResponse>)> {
    auth_user.ensure(can_manage_curators, "assign curators")?;

    let requested = payload.and_then(|Json(p)| p.assignment_date);
    let response =
        CuratorService::auto_assign(&state, requested, today_utc(), Some(auth_user.id)).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Record an admin-chosen curator
pub async fn manual_assign(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ManualAssignRequest>,
) -> AppResult<(StatusCode, Json<ManualAssignResponse>)> {
    auth_user.ensure(can_manage_curators, "assign curators")?;
    payload.validate()?;

    let response = CuratorService::manual_assign(state.db(), payload, &auth_user.id).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Toggle the skipped flag of an assignment
pub async fn toggle_skip(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AssignmentResponse>> {
    auth_user.ensure(can_manage_curators, "skip assignments")?;

    let assignment = CuratorService::toggle_skip(state.db(), &id).await?;
    Ok(Json(assignment))
}

/// Remove a member from the rotation pool
pub async fn remove_from_pool(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<PoolRemovalResponse>> {
    auth_user.ensure(can_manage_curators, "change the curator pool")?;

    let response = CuratorService::remove_from_pool(state.db(), &profile_id, today_utc()).await?;
    Ok(Json(response))
}

/// Put a member back into the rotation pool
pub async fn restore_to_pool(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<PoolRestoreResponse>> {
    auth_user.ensure(can_manage_curators, "change the curator pool")?;

    let response = CuratorService::restore_to_pool(state.db(), &profile_id).await?;
    Ok(Json(response))
}

/// Delete every assignment of a profile
pub async fn purge_assignments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<PurgeResponse>> {
    auth_user.ensure(can_manage_curators, "purge curator history")?;

    let response = CuratorService::purge_assignments(state.db(), &profile_id).await?;
    Ok(Json(response))
}
