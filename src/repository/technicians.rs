//! Technicians repository

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::equipment::{CreateTechnician, Technician},
};

#[derive(Clone)]
pub struct TechniciansRepository {
    pool: SqlitePool,
}

impl TechniciansRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Technician>> {
        let rows = sqlx::query_as::<_, Technician>("SELECT * FROM technicians ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &CreateTechnician) -> AppResult<Technician> {
        let row = sqlx::query_as::<_, Technician>(
            r#"
            INSERT INTO technicians (name, utilization_percentage, status)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.utilization_percentage.unwrap_or(0))
        .bind(data.status.as_deref().unwrap_or("active"))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Integer average utilization, 0 when there are no technicians
    pub async fn average_utilization(&self) -> AppResult<i64> {
        let average: Option<f64> = sqlx::query_scalar("SELECT AVG(utilization_percentage) FROM technicians")
            .fetch_one(&self.pool)
            .await?;
        Ok(average.map(|value| value as i64).unwrap_or(0))
    }
}
