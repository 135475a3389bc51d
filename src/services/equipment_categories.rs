//! Equipment categories service

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipmentCategory, EquipmentCategory, UpdateEquipmentCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentCategoriesService {
    repository: Repository,
}

impl EquipmentCategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        self.repository.equipment_categories.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<EquipmentCategory> {
        self.repository.equipment_categories.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipmentCategory) -> AppResult<EquipmentCategory> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("Category name is required".to_string()));
        }
        self.repository.equipment_categories.create(data).await
    }

    pub async fn update(&self, id: i64, data: &UpdateEquipmentCategory) -> AppResult<EquipmentCategory> {
        if matches!(data.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("Category name is required".to_string()));
        }
        self.repository.equipment_categories.update(id, data).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.equipment_categories.delete(id).await
    }
}
