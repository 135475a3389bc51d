//! Maintenance requests repository
//!
//! Requests and their worksheet comments live in the requests store. Equipment
//! names are attached later by the enrichment service; nothing here reaches
//! into the equipment store.

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        maintenance_request::{
            MaintenanceRequest, NewMaintenanceRequest, UpdateMaintenanceRequest, WorksheetComment,
        },
    },
};

/// Size of the "recent requests" listing
pub const RECENT_REQUESTS_LIMIT: i64 = 50;

/// Request columns. Date columns are read as text: a `DATE` column from an older
/// schema holds digit-only values as integers.
const REQUEST_COLUMNS: &str = "id, subject, employee, technician, category, stage, company, status, \
     request_type, priority, description, CAST(scheduled_date AS TEXT) AS scheduled_date, \
     CAST(due_date AS TEXT) AS due_date, equipment_id, work_center_id, maintenance_for, notes, \
     instructions, team, CAST(request_date AS TEXT) AS request_date, duration, created_at, updated_at";

#[derive(Clone)]
pub struct RequestsRepository {
    pool: SqlitePool,
}

impl RequestsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List requests newest first, optionally restricted to one status
    pub async fn list(&self, status: Option<&str>) -> AppResult<Vec<MaintenanceRequest>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, MaintenanceRequest>(&format!(
                    "SELECT {} FROM maintenance_requests WHERE status = ? ORDER BY created_at DESC, id DESC",
                    REQUEST_COLUMNS
                ))
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, MaintenanceRequest>(&format!(
                    "SELECT {} FROM maintenance_requests ORDER BY created_at DESC, id DESC",
                    REQUEST_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// The `limit` most recent requests
    pub async fn list_limited(&self, limit: i64) -> AppResult<Vec<MaintenanceRequest>> {
        let rows = sqlx::query_as::<_, MaintenanceRequest>(&format!(
            "SELECT {} FROM maintenance_requests ORDER BY created_at DESC, id DESC LIMIT ?",
            REQUEST_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_recent(&self) -> AppResult<Vec<MaintenanceRequest>> {
        self.list_limited(RECENT_REQUESTS_LIMIT).await
    }

    /// Requests filed against one piece of equipment
    pub async fn list_by_equipment(&self, equipment_id: i64) -> AppResult<Vec<MaintenanceRequest>> {
        let rows = sqlx::query_as::<_, MaintenanceRequest>(&format!(
            "SELECT {} FROM maintenance_requests WHERE equipment_id = ? ORDER BY created_at DESC, id DESC",
            REQUEST_COLUMNS
        ))
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<MaintenanceRequest> {
        let query = format!("SELECT {} FROM maintenance_requests WHERE id = ?", REQUEST_COLUMNS);
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM maintenance_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Insert a request; status and stage always start as `New`
    pub async fn create(&self, data: &NewMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let initial = RequestStatus::New.as_str();

        let query = format!(
            r#"
            INSERT INTO maintenance_requests (subject, employee, equipment_id, work_center_id,
                                              maintenance_for, request_type, priority, description,
                                              scheduled_date, due_date, company, status, stage, team,
                                              technician, category, request_date, duration, notes,
                                              instructions)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        );

        let row = sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(&data.subject)
            .bind(&data.employee)
            .bind(data.equipment_id)
            .bind(data.work_center_id)
            .bind(data.maintenance_for.as_str())
            .bind(&data.request_type)
            .bind(&data.priority)
            .bind(&data.description)
            .bind(&data.scheduled_date)
            .bind(&data.due_date)
            .bind(&data.company)
            .bind(initial)
            .bind(initial)
            .bind(&data.team)
            .bind(&data.technician)
            .bind(&data.category)
            .bind(&data.request_date)
            .bind(&data.duration)
            .bind(&data.notes)
            .bind(&data.instructions)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Write status and stage together
    pub async fn update_status(&self, id: i64, status: &str) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(&format!(
            "UPDATE maintenance_requests SET status = ?, stage = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? RETURNING {}",
            REQUEST_COLUMNS
        ))
        .bind(status)
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Update the supplied fields only; a status change also moves the stage
    pub async fn update(&self, id: i64, data: &UpdateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let mut sets: Vec<String> = Vec::new();

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ?", $name));
                }
            };
        }

        add_field!(data.subject, "subject");
        add_field!(data.employee, "employee");
        add_field!(data.equipment_id, "equipment_id");
        add_field!(data.work_center_id, "work_center_id");
        add_field!(data.maintenance_for, "maintenance_for");
        add_field!(data.request_type, "request_type");
        add_field!(data.priority, "priority");
        add_field!(data.description, "description");
        add_field!(data.scheduled_date, "scheduled_date");
        add_field!(data.due_date, "due_date");
        add_field!(data.company, "company");
        add_field!(data.team, "team");
        add_field!(data.technician, "technician");
        add_field!(data.category, "category");
        add_field!(data.request_date, "request_date");
        add_field!(data.duration, "duration");
        add_field!(data.notes, "notes");
        add_field!(data.instructions, "instructions");
        add_field!(data.status, "status");
        add_field!(data.status, "stage");

        if sets.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }
        sets.push("updated_at = CURRENT_TIMESTAMP".to_string());

        let query = format!(
            "UPDATE maintenance_requests SET {} WHERE id = ? RETURNING {}",
            sets.join(", "),
            REQUEST_COLUMNS
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.subject);
        bind_field!(data.employee);
        bind_field!(data.equipment_id);
        bind_field!(data.work_center_id);
        if let Some(target) = data.maintenance_for {
            builder = builder.bind(target.as_str());
        }
        bind_field!(data.request_type);
        bind_field!(data.priority);
        bind_field!(data.description);
        bind_field!(data.scheduled_date);
        bind_field!(data.due_date);
        bind_field!(data.company);
        bind_field!(data.team);
        bind_field!(data.technician);
        bind_field!(data.category);
        bind_field!(data.request_date);
        bind_field!(data.duration);
        bind_field!(data.notes);
        bind_field!(data.instructions);
        bind_field!(data.status);
        bind_field!(data.status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Delete a request and its comments; a missing id is not an error
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM worksheet_comments WHERE request_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM maintenance_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Comments on a request, newest first
    pub async fn list_comments(&self, request_id: i64) -> AppResult<Vec<WorksheetComment>> {
        let rows = sqlx::query_as::<_, WorksheetComment>(
            r#"
            SELECT id, request_id, user, comment, created_at
            FROM worksheet_comments
            WHERE request_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_comment(&self, request_id: i64, user: &str, comment: &str) -> AppResult<WorksheetComment> {
        if comment.trim().is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        let row = sqlx::query_as::<_, WorksheetComment>(
            r#"
            INSERT INTO worksheet_comments (request_id, user, comment)
            VALUES (?, ?, ?)
            RETURNING id, request_id, user, comment, created_at
            "#,
        )
        .bind(request_id)
        .bind(user)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
