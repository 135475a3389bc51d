//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::MaintenanceFor,
        maintenance_request::{
            CreateComment, CreateMaintenanceRequest, MaintenanceRequestDetails, RequestQuery,
            UpdateMaintenanceRequest, UpdateStatus, WorksheetComment,
        },
    },
};

use super::AuthenticatedUser;

/// List requests, newest first, optionally filtered by status
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "Requests with equipment names", body = Vec<MaintenanceRequestDetails>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let status = query.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let requests = state.services.requests.list(status).await?;
    Ok(Json(requests))
}

/// Most recent requests, capped
#[utoipa::path(
    get,
    path = "/requests/recent",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recent requests", body = Vec<MaintenanceRequestDetails>)
    )
)]
pub async fn list_recent_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let requests = state.services.requests.list_recent().await?;
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = MaintenanceRequestDetails),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MaintenanceRequestDetails>> {
    let request = state.services.requests.get_by_id(id).await?;
    Ok(Json(request))
}

/// File a request as the signed-in user
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Request created in stage New", body = MaintenanceRequestDetails),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequestDetails>)> {
    match data.maintenance_for {
        MaintenanceFor::Equipment => {
            if data.equipment_id.is_none() {
                return Err(AppError::Validation("Please select an equipment".to_string()));
            }
        }
        MaintenanceFor::WorkCenter => {
            let work_center_id = data
                .work_center_id
                .ok_or_else(|| AppError::Validation("Please select a work center".to_string()))?;
            if !state.services.work_centers.exists(work_center_id).await? {
                return Err(AppError::Validation("Please select a work center".to_string()));
            }
        }
    }

    let request = state.services.requests.create(claims.email(), &data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Update the supplied fields of a request
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequestDetails),
        (status = 400, description = "Invalid input or no fields to update"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(data): Json<UpdateMaintenanceRequest>,
) -> AppResult<Json<MaintenanceRequestDetails>> {
    let request = state.services.requests.update(id, &data).await?;
    Ok(Json(request))
}

#[utoipa::path(
    put,
    path = "/requests/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status changed", body = MaintenanceRequestDetails),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_request_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(data): Json<UpdateStatus>,
) -> AppResult<Json<MaintenanceRequestDetails>> {
    let request = state.services.requests.update_status(id, &data.status).await?;
    Ok(Json(request))
}

/// Delete a request with its worksheet comments
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted")
    )
)]
pub async fn delete_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.requests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/requests/{id}/comments",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Worksheet comments, newest first", body = Vec<WorksheetComment>)
    )
)]
pub async fn list_comments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<WorksheetComment>>> {
    let comments = state.services.requests.list_comments(id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/requests/{id}/comments",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment added", body = WorksheetComment),
        (status = 400, description = "Empty comment"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn add_comment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(data): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<WorksheetComment>)> {
    let comment = state
        .services
        .requests
        .add_comment(id, claims.email(), &data.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
