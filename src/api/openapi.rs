//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, calendar, dashboard, equipment, equipment_categories, health, reports, requests, technicians,
    users, work_centers,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Upkeep API",
        version = "1.0.0",
        description = "Maintenance tracking REST API: equipment, work centers and maintenance requests"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::logout,
        auth::forgot_password,
        auth::me,
        // Users
        users::list_users,
        users::user_signups,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::list_equipment_requests,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment_categories::list_categories,
        equipment_categories::get_category,
        equipment_categories::create_category,
        equipment_categories::update_category,
        equipment_categories::delete_category,
        // Work centers
        work_centers::list_work_centers,
        work_centers::get_work_center,
        work_centers::create_work_center,
        work_centers::update_work_center,
        work_centers::delete_work_center,
        // Technicians
        technicians::list_technicians,
        technicians::create_technician,
        // Requests
        requests::list_requests,
        requests::list_recent_requests,
        requests::get_request,
        requests::create_request,
        requests::update_request,
        requests::update_request_status,
        requests::delete_request,
        requests::list_comments,
        requests::add_comment,
        // Dashboard
        dashboard::get_dashboard,
        dashboard::get_dashboard_stats,
        dashboard::get_status_breakdown,
        // Calendar
        calendar::get_calendar,
        // Reports
        reports::generate_report,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::SignupRequest,
            crate::models::user::LoginRequest,
            crate::models::user::ForgotPasswordRequest,
            auth::LoginResponse,
            auth::UserInfo,
            auth::MessageResponse,
            // Users
            crate::models::user::UserWithProfile,
            crate::models::user::SignupCount,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentInput,
            crate::models::equipment::EquipmentCategory,
            crate::models::equipment::CreateEquipmentCategory,
            crate::models::equipment::UpdateEquipmentCategory,
            crate::models::equipment::Technician,
            crate::models::equipment::CreateTechnician,
            crate::models::enums::EquipmentStatus,
            // Work centers
            crate::models::work_center::WorkCenter,
            crate::models::work_center::CreateWorkCenter,
            crate::models::work_center::UpdateWorkCenter,
            // Requests
            crate::models::maintenance_request::MaintenanceRequest,
            crate::models::maintenance_request::MaintenanceRequestDetails,
            crate::models::maintenance_request::CreateMaintenanceRequest,
            crate::models::maintenance_request::UpdateMaintenanceRequest,
            crate::models::maintenance_request::UpdateStatus,
            crate::models::maintenance_request::RequestQuery,
            crate::models::maintenance_request::WorksheetComment,
            crate::models::maintenance_request::CreateComment,
            crate::models::enums::RequestStatus,
            crate::models::enums::MaintenanceFor,
            // Dashboard and calendar
            crate::services::stats::DashboardView,
            crate::services::stats::DashboardStats,
            crate::services::stats::StatusBreakdown,
            crate::services::calendar::CalendarView,
            crate::services::calendar::ScheduledEntry,
            // Reports
            crate::services::reports::ReportRequest,
            crate::services::reports::Report,
            crate::services::reports::ReportKind,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Signup, login and session endpoints"),
        (name = "users", description = "Portal users"),
        (name = "equipment", description = "Equipment and equipment categories"),
        (name = "work-centers", description = "Work centers"),
        (name = "technicians", description = "Technicians"),
        (name = "requests", description = "Maintenance requests and worksheet comments"),
        (name = "dashboard", description = "Dashboard figures"),
        (name = "calendar", description = "Maintenance calendar"),
        (name = "reports", description = "Tabular reports and CSV export")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
