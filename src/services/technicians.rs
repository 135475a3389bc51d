//! Technicians service

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateTechnician, Technician},
    repository::Repository,
};

#[derive(Clone)]
pub struct TechniciansService {
    repository: Repository,
}

impl TechniciansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Technician>> {
        self.repository.technicians.list().await
    }

    pub async fn create(&self, data: &CreateTechnician) -> AppResult<Technician> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("Technician name cannot be empty".to_string()));
        }
        if matches!(data.utilization_percentage, Some(value) if !(0..=100).contains(&value)) {
            return Err(AppError::Validation(
                "Utilization percentage must be between 0 and 100".to_string(),
            ));
        }
        self.repository.technicians.create(data).await
    }

    pub async fn average_utilization(&self) -> AppResult<i64> {
        self.repository.technicians.average_utilization().await
    }
}
