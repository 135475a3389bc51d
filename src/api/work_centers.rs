//! Work center endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Work centers, ordered by name", body = Vec<WorkCenter>)
    )
)]
pub async fn list_work_centers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<WorkCenter>>> {
    let work_centers = state.services.work_centers.list().await?;
    Ok(Json(work_centers))
}

#[utoipa::path(
    get,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Work center ID")),
    responses(
        (status = 200, description = "Work center", body = WorkCenter),
        (status = 404, description = "Work center not found")
    )
)]
pub async fn get_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<WorkCenter>> {
    let work_center = state.services.work_centers.get_by_id(id).await?;
    Ok(Json(work_center))
}

#[utoipa::path(
    post,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    request_body = CreateWorkCenter,
    responses(
        (status = 201, description = "Work center created", body = WorkCenter),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateWorkCenter>,
) -> AppResult<(StatusCode, Json<WorkCenter>)> {
    let work_center = state.services.work_centers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(work_center)))
}

/// Update the supplied fields of a work center
#[utoipa::path(
    put,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Work center ID")),
    request_body = UpdateWorkCenter,
    responses(
        (status = 200, description = "Work center updated", body = WorkCenter),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Work center not found")
    )
)]
pub async fn update_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(data): Json<UpdateWorkCenter>,
) -> AppResult<Json<WorkCenter>> {
    let work_center = state.services.work_centers.update(id, &data).await?;
    Ok(Json(work_center))
}

#[utoipa::path(
    delete,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Work center ID")),
    responses(
        (status = 204, description = "Work center deleted")
    )
)]
pub async fn delete_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.work_centers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
