//! Equipment and equipment category models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const DEFAULT_EQUIPMENT_COMPANY: &str = "My Company (San Francisco)";

/// Equipment record, joined with its category name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    /// Health from 0 to 100; below 30 counts as critical
    pub health_percentage: i64,
    /// active, inactive or scrapped
    pub status: String,
    #[sqlx(default)]
    pub employee: Option<String>,
    #[sqlx(default)]
    pub department: Option<String>,
    #[sqlx(default)]
    pub serial_number: Option<String>,
    #[sqlx(default)]
    pub technician: Option<String>,
    #[sqlx(default)]
    pub equipment_category_id: Option<i64>,
    #[sqlx(default)]
    pub company: Option<String>,
    #[sqlx(default)]
    pub used_by: Option<String>,
    #[sqlx(default)]
    pub maintenance_team: Option<String>,
    #[sqlx(default)]
    pub assigned_date: Option<String>,
    #[sqlx(default)]
    pub description: Option<String>,
    #[sqlx(default)]
    pub scrap_date: Option<String>,
    #[sqlx(default)]
    pub used_in_location: Option<String>,
    #[sqlx(default)]
    pub work_center_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    /// Name of the referenced category, null when none or deleted
    #[sqlx(default)]
    pub category_name: Option<String>,
}

/// Equipment payload, used for both creation and full-overwrite update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EquipmentInput {
    pub name: String,
    /// Defaults to 100
    pub health_percentage: Option<i64>,
    /// Defaults to `active`
    pub status: Option<String>,
    pub employee: Option<String>,
    pub department: Option<String>,
    pub serial_number: Option<String>,
    pub technician: Option<String>,
    pub equipment_category_id: Option<i64>,
    pub company: Option<String>,
    pub used_by: Option<String>,
    pub maintenance_team: Option<String>,
    pub assigned_date: Option<String>,
    pub description: Option<String>,
    pub scrap_date: Option<String>,
    pub used_in_location: Option<String>,
    pub work_center_id: Option<i64>,
}

/// Equipment category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentCategory {
    pub id: i64,
    pub name: String,
    #[sqlx(default)]
    pub responsible: Option<String>,
    #[sqlx(default)]
    pub company: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEquipmentCategory {
    pub name: String,
    pub responsible: Option<String>,
    pub company: Option<String>,
}

/// Partial update: only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEquipmentCategory {
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub company: Option<String>,
}

impl UpdateEquipmentCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.responsible.is_none() && self.company.is_none()
    }
}

/// Technician record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Technician {
    pub id: i64,
    pub name: String,
    pub utilization_percentage: i64,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTechnician {
    pub name: String,
    pub utilization_percentage: Option<i64>,
    pub status: Option<String>,
}
