//! Shared domain enums
//!
//! Statuses are persisted as free text; these enums give the known values a
//! closed, typed form without forbidding legacy rows that hold other strings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Lifecycle stage of a maintenance request (`status` and `stage` always hold
/// the same value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Blocked")]
    Blocked,
    #[serde(rename = "Ready for next stage")]
    ReadyForNextStage,
    #[serde(rename = "Repaired")]
    Repaired,
    #[serde(rename = "Scrap")]
    Scrap,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Blocked,
        RequestStatus::ReadyForNextStage,
        RequestStatus::Repaired,
        RequestStatus::Scrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "New",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Blocked => "Blocked",
            RequestStatus::ReadyForNextStage => "Ready for next stage",
            RequestStatus::Repaired => "Repaired",
            RequestStatus::Scrap => "Scrap",
        }
    }

    /// Repaired and Scrap end the work in practice (they can still be reopened)
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Repaired | RequestStatus::Scrap)
    }

    /// Statuses that still count as outstanding work for overdue reporting
    pub fn is_open_work(&self) -> bool {
        matches!(
            self,
            RequestStatus::New
                | RequestStatus::InProgress
                | RequestStatus::Blocked
                | RequestStatus::ReadyForNextStage
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Invalid request status: {}", s))
    }
}

// ---------------------------------------------------------------------------
// MaintenanceFor
// ---------------------------------------------------------------------------

/// Which weak reference of a request is authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MaintenanceFor {
    #[serde(rename = "Equipment")]
    Equipment,
    #[serde(rename = "Work Center")]
    WorkCenter,
}

impl MaintenanceFor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceFor::Equipment => "Equipment",
            MaintenanceFor::WorkCenter => "Work Center",
        }
    }
}

impl Default for MaintenanceFor {
    fn default() -> Self {
        MaintenanceFor::Equipment
    }
}

impl std::fmt::Display for MaintenanceFor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Active,
    Inactive,
    Scrapped,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Inactive => "inactive",
            EquipmentStatus::Scrapped => "scrapped",
        }
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(EquipmentStatus::Active),
            "inactive" => Ok(EquipmentStatus::Inactive),
            "scrapped" => Ok(EquipmentStatus::Scrapped),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}
