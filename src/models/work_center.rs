//! Work center model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Work center record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkCenter {
    pub id: i64,
    pub name: String,
    #[sqlx(default)]
    pub code: Option<String>,
    #[sqlx(default)]
    pub tag: Option<String>,
    #[sqlx(default)]
    pub alternative_workcenters: Option<String>,
    #[sqlx(default)]
    pub cost_per_hour: Option<f64>,
    /// Percentage, 100 when unset
    #[sqlx(default)]
    pub capacity_time_efficiency: Option<f64>,
    /// Overall equipment effectiveness target, percentage
    #[sqlx(default)]
    pub oee_target: Option<f64>,
    #[sqlx(default)]
    pub company: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create work center request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateWorkCenter {
    pub name: String,
    pub code: Option<String>,
    pub tag: Option<String>,
    pub alternative_workcenters: Option<String>,
    /// Defaults to 0
    pub cost_per_hour: Option<f64>,
    /// Defaults to 100
    pub capacity_time_efficiency: Option<f64>,
    /// Defaults to 0
    pub oee_target: Option<f64>,
    pub company: Option<String>,
}

/// Update work center request; unset fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateWorkCenter {
    pub name: Option<String>,
    pub code: Option<String>,
    pub tag: Option<String>,
    pub alternative_workcenters: Option<String>,
    pub cost_per_hour: Option<f64>,
    pub capacity_time_efficiency: Option<f64>,
    pub oee_target: Option<f64>,
    pub company: Option<String>,
}

impl UpdateWorkCenter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.code.is_none()
            && self.tag.is_none()
            && self.alternative_workcenters.is_none()
            && self.cost_per_hour.is_none()
            && self.capacity_time_efficiency.is_none()
            && self.oee_target.is_none()
            && self.company.is_none()
    }
}
