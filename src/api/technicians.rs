//! Technician endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::equipment::{CreateTechnician, Technician},
};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/technicians",
    tag = "technicians",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Technicians", body = Vec<Technician>)
    )
)]
pub async fn list_technicians(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Technician>>> {
    let technicians = state.services.technicians.list().await?;
    Ok(Json(technicians))
}

#[utoipa::path(
    post,
    path = "/technicians",
    tag = "technicians",
    security(("bearer_auth" = [])),
    request_body = CreateTechnician,
    responses(
        (status = 201, description = "Technician created", body = Technician)
    )
)]
pub async fn create_technician(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateTechnician>,
) -> AppResult<(StatusCode, Json<Technician>)> {
    let technician = state.services.technicians.create(&data).await?;
    Ok((StatusCode::CREATED, Json(technician)))
}
