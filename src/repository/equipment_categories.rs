//! Equipment categories repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipmentCategory, EquipmentCategory, UpdateEquipmentCategory, DEFAULT_EQUIPMENT_COMPANY,
    },
};

#[derive(Clone)]
pub struct EquipmentCategoriesRepository {
    pool: SqlitePool,
}

impl EquipmentCategoriesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        let rows = sqlx::query_as::<_, EquipmentCategory>("SELECT * FROM equipment_categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>("SELECT * FROM equipment_categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment category {} not found", id)))
    }

    pub async fn create(&self, data: &CreateEquipmentCategory) -> AppResult<EquipmentCategory> {
        let row = sqlx::query_as::<_, EquipmentCategory>(
            r#"
            INSERT INTO equipment_categories (name, responsible, company)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.responsible)
        .bind(data.company.as_deref().unwrap_or(DEFAULT_EQUIPMENT_COMPANY))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the supplied fields only
    pub async fn update(&self, id: i64, data: &UpdateEquipmentCategory) -> AppResult<EquipmentCategory> {
        if data.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        let mut sets = vec!["updated_at = CURRENT_TIMESTAMP".to_string()];

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ?", $name));
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.responsible, "responsible");
        add_field!(data.company, "company");

        let query = format!(
            "UPDATE equipment_categories SET {} WHERE id = ? RETURNING *",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, EquipmentCategory>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.responsible);
        bind_field!(data.company);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment category {} not found", id)))
    }

    /// Delete a category; equipment keeps its now-dangling reference
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM equipment_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
