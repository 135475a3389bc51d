//! Equipment service

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{Equipment, EquipmentInput},
    },
    repository::Repository,
    services::stats::parse_date,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &EquipmentInput) -> AppResult<Equipment> {
        let data = validate(data)?;
        let equipment = self.repository.equipment.create(&data).await?;
        tracing::info!("Created equipment {} ({})", equipment.id, equipment.name);
        Ok(equipment)
    }

    /// Full overwrite of an existing equipment row
    pub async fn update(&self, id: i64, data: &EquipmentInput) -> AppResult<Equipment> {
        let data = validate(data)?;
        let equipment = self.repository.equipment.update(id, &data).await?;
        tracing::info!("Updated equipment {}", id);
        Ok(equipment)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;
        tracing::info!("Deleted equipment {}", id);
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.equipment.count().await
    }

    /// Equipment with health below 30%
    pub async fn count_critical(&self) -> AppResult<i64> {
        self.repository.equipment.count_critical().await
    }
}

/// Check an equipment payload and return it with the status in its canonical
/// lowercase form
fn validate(data: &EquipmentInput) -> AppResult<EquipmentInput> {
    if data.name.trim().is_empty() {
        return Err(AppError::Validation("Equipment name cannot be empty".to_string()));
    }

    if let Some(health) = data.health_percentage {
        if !(0..=100).contains(&health) {
            return Err(AppError::Validation(
                "Health percentage must be between 0 and 100".to_string(),
            ));
        }
    }

    for (label, value) in [("assigned date", &data.assigned_date), ("scrap date", &data.scrap_date)] {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            if parse_date(value).is_none() {
                return Err(AppError::Validation(format!(
                    "Invalid {}: {} (expected YYYY-MM-DD)",
                    label, value
                )));
            }
        }
    }

    let mut normalized = data.clone();
    if let Some(ref status) = data.status {
        let status = status
            .trim()
            .parse::<EquipmentStatus>()
            .map_err(AppError::Validation)?;
        normalized.status = Some(status.as_str().to_string());
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> EquipmentInput {
        EquipmentInput {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(matches!(validate(&input("  ")), Err(AppError::Validation(_))));
        assert!(validate(&input("Lathe")).is_ok());
    }

    #[test]
    fn test_validate_health_bounds() {
        let mut data = input("Lathe");
        data.health_percentage = Some(101);
        assert!(matches!(validate(&data), Err(AppError::Validation(_))));
        data.health_percentage = Some(-1);
        assert!(validate(&data).is_err());
        data.health_percentage = Some(0);
        assert!(validate(&data).is_ok());
        data.health_percentage = Some(100);
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_validate_status_set() {
        let mut data = input("Lathe");
        data.status = Some("broken".to_string());
        assert!(validate(&data).is_err());
        data.status = Some("scrapped".to_string());
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_validate_lowercases_status() {
        let mut data = input("Lathe");
        data.status = Some(" ACTIVE".to_string());
        assert_eq!(validate(&data).unwrap().status.as_deref(), Some("active"));
        data.status = Some("Scrapped".to_string());
        assert_eq!(validate(&data).unwrap().status.as_deref(), Some("scrapped"));
    }

    #[test]
    fn test_validate_dates() {
        let mut data = input("Lathe");
        data.assigned_date = Some("2024-01-15".to_string());
        data.scrap_date = Some(String::new());
        assert!(validate(&data).is_ok());
        data.scrap_date = Some("20240501".to_string());
        assert!(matches!(validate(&data), Err(AppError::Validation(_))));
    }
}
