//! Report generation endpoint

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    services::reports::{Report, ReportRequest},
};

use super::AuthenticatedUser;

/// Generate a report. With `export_format = "csv"` the CSV text is returned
/// directly as `text/csv`.
#[utoipa::path(
    post,
    path = "/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report rows and CSV rendering", body = Report),
        (status = 400, description = "Invalid report type or date", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate_report(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<ReportRequest>,
) -> AppResult<Response> {
    let report = state.services.reports.generate(&request).await?;

    if request.wants_csv() {
        return Ok(([(CONTENT_TYPE, "text/csv; charset=utf-8")], report.csv_content).into_response());
    }
    Ok(Json(report).into_response())
}
