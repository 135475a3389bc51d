//! Equipment category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipmentCategory, EquipmentCategory, UpdateEquipmentCategory},
};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/equipment-categories",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category list", body = Vec<EquipmentCategory>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EquipmentCategory>>> {
    let categories = state.services.equipment_categories.list().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/equipment-categories/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = EquipmentCategory),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<EquipmentCategory>> {
    let category = state.services.equipment_categories.get_by_id(id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/equipment-categories",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipmentCategory,
    responses(
        (status = 201, description = "Category created", body = EquipmentCategory)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateEquipmentCategory>,
) -> AppResult<(StatusCode, Json<EquipmentCategory>)> {
    let category = state.services.equipment_categories.create(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update the supplied fields of a category
#[utoipa::path(
    put,
    path = "/equipment-categories/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    request_body = UpdateEquipmentCategory,
    responses(
        (status = 200, description = "Category updated", body = EquipmentCategory),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(data): Json<UpdateEquipmentCategory>,
) -> AppResult<Json<EquipmentCategory>> {
    let category = state.services.equipment_categories.update(id, &data).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/equipment-categories/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.equipment_categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
