//! Portal user listing endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::user::{SignupCount, UserWithProfile},
};

use super::AuthenticatedUser;

/// List users with their profile details
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of users", body = Vec<UserWithProfile>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserWithProfile>>> {
    let users = state.services.auth.list_users().await?;
    Ok(Json(users))
}

/// Signups per day over the last seven days
#[utoipa::path(
    get,
    path = "/users/signups",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signup counts per day", body = Vec<SignupCount>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn user_signups(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SignupCount>>> {
    let signups = state.services.auth.signups_last_week().await?;
    Ok(Json(signups))
}
