//! Work centers service

use crate::{
    error::{AppError, AppResult},
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
    repository::Repository,
};

#[derive(Clone)]
pub struct WorkCentersService {
    repository: Repository,
}

impl WorkCentersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<WorkCenter>> {
        self.repository.work_centers.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<WorkCenter> {
        self.repository.work_centers.get_by_id(id).await
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        self.repository.work_centers.exists(id).await
    }

    pub async fn create(&self, data: &CreateWorkCenter) -> AppResult<WorkCenter> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("Work center name is required".to_string()));
        }
        validate_figures(data.cost_per_hour, data.capacity_time_efficiency, data.oee_target)?;

        let work_center = self.repository.work_centers.create(data).await?;
        tracing::info!("Created work center {} ({})", work_center.id, work_center.name);
        Ok(work_center)
    }

    pub async fn update(&self, id: i64, data: &UpdateWorkCenter) -> AppResult<WorkCenter> {
        if matches!(data.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("Work center name is required".to_string()));
        }
        validate_figures(data.cost_per_hour, data.capacity_time_efficiency, data.oee_target)?;

        self.repository.work_centers.update(id, data).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.work_centers.delete(id).await
    }
}

fn validate_figures(
    cost_per_hour: Option<f64>,
    capacity_time_efficiency: Option<f64>,
    oee_target: Option<f64>,
) -> AppResult<()> {
    if matches!(cost_per_hour, Some(cost) if cost < 0.0) {
        return Err(AppError::Validation("Cost per hour cannot be negative".to_string()));
    }

    let percent = 0.0..=100.0;
    if matches!(capacity_time_efficiency, Some(value) if !percent.contains(&value)) {
        return Err(AppError::Validation(
            "Capacity time efficiency must be between 0 and 100".to_string(),
        ));
    }
    if matches!(oee_target, Some(value) if !percent.contains(&value)) {
        return Err(AppError::Validation("OEE target must be between 0 and 100".to_string()));
    }

    Ok(())
}
