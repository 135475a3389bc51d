//! Upkeep maintenance tracker
//!
//! REST JSON API for tracking equipment, work centers and the maintenance
//! requests filed against them, with dashboard figures, a schedule calendar
//! and CSV reports.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/signup", post(api::auth::signup))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/forgot-password", post(api::auth::forgot_password))
        .route("/auth/me", get(api::auth::me))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users/signups", get(api::users::user_signups))
        // Equipment
        .route(
            "/equipment",
            get(api::equipment::list_equipment).post(api::equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(api::equipment::get_equipment)
                .put(api::equipment::update_equipment)
                .delete(api::equipment::delete_equipment),
        )
        .route("/equipment/:id/requests", get(api::equipment::list_equipment_requests))
        .route(
            "/equipment-categories",
            get(api::equipment_categories::list_categories).post(api::equipment_categories::create_category),
        )
        .route(
            "/equipment-categories/:id",
            get(api::equipment_categories::get_category)
                .put(api::equipment_categories::update_category)
                .delete(api::equipment_categories::delete_category),
        )
        // Work centers
        .route(
            "/work-centers",
            get(api::work_centers::list_work_centers).post(api::work_centers::create_work_center),
        )
        .route(
            "/work-centers/:id",
            get(api::work_centers::get_work_center)
                .put(api::work_centers::update_work_center)
                .delete(api::work_centers::delete_work_center),
        )
        // Technicians
        .route(
            "/technicians",
            get(api::technicians::list_technicians).post(api::technicians::create_technician),
        )
        // Maintenance requests
        .route(
            "/requests",
            get(api::requests::list_requests).post(api::requests::create_request),
        )
        .route("/requests/recent", get(api::requests::list_recent_requests))
        .route(
            "/requests/:id",
            get(api::requests::get_request)
                .put(api::requests::update_request)
                .delete(api::requests::delete_request),
        )
        .route("/requests/:id/status", put(api::requests::update_request_status))
        .route(
            "/requests/:id/comments",
            get(api::requests::list_comments).post(api::requests::add_comment),
        )
        // Dashboard, calendar, reports
        .route("/dashboard", get(api::dashboard::get_dashboard))
        .route("/dashboard/stats", get(api::dashboard::get_dashboard_stats))
        .route("/dashboard/status-breakdown", get(api::dashboard::get_status_breakdown))
        .route("/calendar", get(api::calendar::get_calendar))
        .route("/reports", post(api::reports::generate_report))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
