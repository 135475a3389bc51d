//! Equipment repository for database operations

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentInput, DEFAULT_EQUIPMENT_COMPANY},
};

/// Health below this threshold counts as critical
pub const CRITICAL_HEALTH_THRESHOLD: i64 = 30;

/// Date columns are cast to text: a `DATE` column from an older schema holds
/// digit-only values as integers.
const SELECT_WITH_CATEGORY: &str = r#"
    SELECT e.id, e.name, e.health_percentage, e.status, e.employee, e.department,
           e.serial_number, e.technician, e.equipment_category_id, e.company, e.used_by,
           e.maintenance_team, CAST(e.assigned_date AS TEXT) AS assigned_date, e.description,
           CAST(e.scrap_date AS TEXT) AS scrap_date, e.used_in_location, e.work_center_id,
           e.created_at, c.name AS category_name
    FROM equipment e
    LEFT JOIN equipment_categories c ON e.equipment_category_id = c.id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: SqlitePool,
}

impl EquipmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all equipment ordered by name
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(&format!("{} ORDER BY e.name", SELECT_WITH_CATEGORY))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(&format!("{} WHERE e.id = ?", SELECT_WITH_CATEGORY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &EquipmentInput) -> AppResult<Equipment> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO equipment (name, employee, department, serial_number, technician,
                                   equipment_category_id, company, used_by, maintenance_team,
                                   assigned_date, description, scrap_date, used_in_location,
                                   work_center_id, health_percentage, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.employee)
        .bind(&data.department)
        .bind(&data.serial_number)
        .bind(&data.technician)
        .bind(data.equipment_category_id)
        .bind(data.company.as_deref().unwrap_or(DEFAULT_EQUIPMENT_COMPANY))
        .bind(&data.used_by)
        .bind(&data.maintenance_team)
        .bind(&data.assigned_date)
        .bind(&data.description)
        .bind(&data.scrap_date)
        .bind(&data.used_in_location)
        .bind(data.work_center_id)
        .bind(data.health_percentage.unwrap_or(100))
        .bind(data.status.as_deref().unwrap_or("active"))
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Overwrite every field of an equipment row; absent optionals become NULL
    pub async fn update(&self, id: i64, data: &EquipmentInput) -> AppResult<Equipment> {
        let result = sqlx::query(
            r#"
            UPDATE equipment SET name = ?, employee = ?, department = ?, serial_number = ?,
                                 technician = ?, equipment_category_id = ?, company = ?,
                                 used_by = ?, maintenance_team = ?, assigned_date = ?,
                                 description = ?, scrap_date = ?, used_in_location = ?,
                                 work_center_id = ?, health_percentage = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&data.name)
        .bind(&data.employee)
        .bind(&data.department)
        .bind(&data.serial_number)
        .bind(&data.technician)
        .bind(data.equipment_category_id)
        .bind(&data.company)
        .bind(&data.used_by)
        .bind(&data.maintenance_team)
        .bind(&data.assigned_date)
        .bind(&data.description)
        .bind(&data.scrap_date)
        .bind(&data.used_in_location)
        .bind(data.work_center_id)
        .bind(data.health_percentage.unwrap_or(100))
        .bind(data.status.as_deref().unwrap_or("active"))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete equipment; a missing id is not an error
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count equipment whose health is below the critical threshold
    pub async fn count_critical(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE health_percentage < ?")
            .bind(CRITICAL_HEALTH_THRESHOLD)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Name of one equipment row, None when it does not exist
    pub async fn name_by_id(&self, id: i64) -> AppResult<Option<String>> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM equipment WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }

    /// Names for a set of ids in a single query; ids with no row are absent
    pub async fn names_by_ids(&self, ids: &[i64]) -> AppResult<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("SELECT id, name FROM equipment WHERE id IN ({})", placeholders);

        let mut builder = sqlx::query_as::<_, (i64, String)>(&query);
        for id in ids {
            builder = builder.bind(*id);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().collect())
    }
}
