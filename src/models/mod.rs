//! Data models for Upkeep

pub mod enums;
pub mod equipment;
pub mod maintenance_request;
pub mod user;
pub mod work_center;

// Re-export commonly used types
pub use enums::{EquipmentStatus, MaintenanceFor, RequestStatus};
pub use equipment::{Equipment, EquipmentCategory, EquipmentInput, Technician};
pub use maintenance_request::{MaintenanceRequest, MaintenanceRequestDetails, WorksheetComment};
pub use user::{PortalUser, SessionClaims};
pub use work_center::WorkCenter;
