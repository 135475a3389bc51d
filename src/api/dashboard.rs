//! Dashboard endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    services::stats::{DashboardStats, DashboardView, StatusBreakdown},
};

use super::AuthenticatedUser;

/// Counters, breakdown and recent activity in one payload
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard view", body = DashboardView)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardView>> {
    let view = state.services.stats.dashboard().await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request and equipment counters", body = DashboardStats)
    )
)]
pub async fn get_dashboard_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.dashboard_stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/dashboard/status-breakdown",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request counts per status", body = StatusBreakdown)
    )
)]
pub async fn get_status_breakdown(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<StatusBreakdown>> {
    let breakdown = state.services.stats.status_breakdown().await?;
    Ok(Json(breakdown))
}
