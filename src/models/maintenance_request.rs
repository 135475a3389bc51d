//! Maintenance request and worksheet comment models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::MaintenanceFor;

/// Maintenance request as stored in the requests database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i64,
    pub subject: String,
    /// Identity of the requester
    pub employee: String,
    pub technician: Option<String>,
    pub category: Option<String>,
    /// Mirrors `status`
    pub stage: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    #[sqlx(default)]
    pub request_type: Option<String>,
    #[sqlx(default)]
    pub priority: Option<String>,
    #[sqlx(default)]
    pub description: Option<String>,
    /// Date (YYYY-MM-DD) or date and time, as supplied
    #[sqlx(default)]
    pub scheduled_date: Option<String>,
    /// Date (YYYY-MM-DD), as supplied
    #[sqlx(default)]
    pub due_date: Option<String>,
    #[sqlx(default)]
    pub equipment_id: Option<i64>,
    #[sqlx(default)]
    pub work_center_id: Option<i64>,
    /// "Equipment" or "Work Center"
    #[sqlx(default)]
    pub maintenance_for: Option<String>,
    #[sqlx(default)]
    pub notes: Option<String>,
    #[sqlx(default)]
    pub instructions: Option<String>,
    #[sqlx(default)]
    pub team: Option<String>,
    #[sqlx(default)]
    pub request_date: Option<String>,
    #[sqlx(default)]
    pub duration: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl MaintenanceRequest {
    /// Status as stored, empty string when NULL
    pub fn status_str(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }
}

/// Request enriched with the name of its equipment (null when the
/// equipment is unset or no longer exists)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceRequestDetails {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub equipment_name: Option<String>,
}

/// Create maintenance request body. The requester identity is taken from the
/// authenticated session, not from the payload.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateMaintenanceRequest {
    pub subject: String,
    #[serde(default)]
    pub maintenance_for: MaintenanceFor,
    pub equipment_id: Option<i64>,
    pub work_center_id: Option<i64>,
    /// Defaults to "Corrective"
    pub request_type: Option<String>,
    /// Low, Medium, High or Urgent; defaults to "Medium"
    pub priority: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<String>,
    pub due_date: Option<String>,
    pub company: Option<String>,
    pub team: Option<String>,
    pub technician: Option<String>,
    /// Defaults to the equipment name when empty
    pub category: Option<String>,
    /// Defaults to today
    pub request_date: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub instructions: Option<String>,
}

/// Fully resolved insert, after defaults have been applied
#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub subject: String,
    pub employee: String,
    pub maintenance_for: MaintenanceFor,
    pub equipment_id: Option<i64>,
    pub work_center_id: Option<i64>,
    pub request_type: String,
    pub priority: String,
    pub description: Option<String>,
    pub scheduled_date: Option<String>,
    pub due_date: Option<String>,
    pub company: String,
    pub team: Option<String>,
    pub technician: Option<String>,
    pub category: Option<String>,
    pub request_date: String,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub instructions: Option<String>,
}

/// Partial update: only supplied (non-null) fields are written
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMaintenanceRequest {
    pub subject: Option<String>,
    pub employee: Option<String>,
    pub equipment_id: Option<i64>,
    pub work_center_id: Option<i64>,
    pub maintenance_for: Option<MaintenanceFor>,
    pub request_type: Option<String>,
    pub priority: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<String>,
    pub due_date: Option<String>,
    pub company: Option<String>,
    pub team: Option<String>,
    pub technician: Option<String>,
    pub category: Option<String>,
    pub request_date: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub instructions: Option<String>,
    /// Also written to `stage`
    pub status: Option<String>,
}

/// Status transition body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatus {
    pub status: String,
}

/// Query parameters for request listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RequestQuery {
    /// Exact status match
    pub status: Option<String>,
}

/// Worksheet comment attached to a request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorksheetComment {
    pub id: i64,
    pub request_id: i64,
    /// Identity of the author
    pub user: String,
    pub comment: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateComment {
    pub comment: String,
}
