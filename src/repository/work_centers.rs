//! Work centers repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
};

pub const DEFAULT_WORK_CENTER_COMPANY: &str = "My company";

#[derive(Clone)]
pub struct WorkCentersRepository {
    pool: SqlitePool,
}

impl WorkCentersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<WorkCenter>> {
        let rows = sqlx::query_as::<_, WorkCenter>("SELECT * FROM work_centers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<WorkCenter> {
        sqlx::query_as::<_, WorkCenter>("SELECT * FROM work_centers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM work_centers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    pub async fn create(&self, data: &CreateWorkCenter) -> AppResult<WorkCenter> {
        let row = sqlx::query_as::<_, WorkCenter>(
            r#"
            INSERT INTO work_centers (name, code, tag, alternative_workcenters, cost_per_hour,
                                      capacity_time_efficiency, oee_target, company)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.tag)
        .bind(&data.alternative_workcenters)
        .bind(data.cost_per_hour.unwrap_or(0.0))
        .bind(data.capacity_time_efficiency.unwrap_or(100.0))
        .bind(data.oee_target.unwrap_or(0.0))
        .bind(data.company.as_deref().unwrap_or(DEFAULT_WORK_CENTER_COMPANY))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the supplied fields only and bump `updated_at`
    pub async fn update(&self, id: i64, data: &UpdateWorkCenter) -> AppResult<WorkCenter> {
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
        add_field!(data.code, "code");
        add_field!(data.tag, "tag");
        add_field!(data.alternative_workcenters, "alternative_workcenters");
        add_field!(data.cost_per_hour, "cost_per_hour");
        add_field!(data.capacity_time_efficiency, "capacity_time_efficiency");
        add_field!(data.oee_target, "oee_target");
        add_field!(data.company, "company");

        let query = format!("UPDATE work_centers SET {} WHERE id = ? RETURNING *", sets.join(", "));

        let mut builder = sqlx::query_as::<_, WorkCenter>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.code);
        bind_field!(data.tag);
        bind_field!(data.alternative_workcenters);
        bind_field!(data.cost_per_hour);
        bind_field!(data.capacity_time_efficiency);
        bind_field!(data.oee_target);
        bind_field!(data.company);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))
    }

    /// Delete a work center; requests keep their now-dangling reference
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM work_centers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
