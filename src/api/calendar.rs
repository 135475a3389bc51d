//! Calendar endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::calendar::CalendarView};

use super::AuthenticatedUser;

/// Scheduled requests projected onto the calendar
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "calendar",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Calendar view", body = CalendarView)
    )
)]
pub async fn get_calendar(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<CalendarView>> {
    let view = state.services.calendar.view().await?;
    Ok(Json(view))
}
