//! Business logic services

pub mod auth;
pub mod calendar;
pub mod enrichment;
pub mod equipment;
pub mod equipment_categories;
pub mod reports;
pub mod requests;
pub mod stats;
pub mod technicians;
pub mod work_centers;

use crate::{
    config::{AuthConfig, RequestsConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub equipment_categories: equipment_categories::EquipmentCategoriesService,
    pub technicians: technicians::TechniciansService,
    pub work_centers: work_centers::WorkCentersService,
    pub requests: requests::RequestsService,
    pub stats: stats::StatsService,
    pub reports: reports::ReportsService,
    pub calendar: calendar::CalendarService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, requests_config: RequestsConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            equipment_categories: equipment_categories::EquipmentCategoriesService::new(repository.clone()),
            technicians: technicians::TechniciansService::new(repository.clone()),
            work_centers: work_centers::WorkCentersService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone(), requests_config),
            stats: stats::StatsService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            calendar: calendar::CalendarService::new(repository.clone()),
            repository,
        }
    }
}
