//! Maintenance request lifecycle service
//!
//! Every request leaving this service carries its equipment name. The actor
//! (requester or comment author) is always passed in by the caller.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::{
    config::RequestsConfig,
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        maintenance_request::{
            CreateMaintenanceRequest, MaintenanceRequestDetails, NewMaintenanceRequest,
            UpdateMaintenanceRequest, WorksheetComment,
        },
    },
    repository::Repository,
};

use super::{enrichment::EnrichmentService, stats::parse_date};

pub const DEFAULT_REQUEST_TYPE: &str = "Corrective";
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Date-time layouts accepted for `scheduled_date`, besides a plain date
const SCHEDULE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    enrichment: EnrichmentService,
    config: RequestsConfig,
}

impl RequestsService {
    pub fn new(repository: Repository, config: RequestsConfig) -> Self {
        Self {
            enrichment: EnrichmentService::new(repository.clone()),
            repository,
            config,
        }
    }

    pub async fn list(&self, status: Option<&str>) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let status = status.map(str::trim).filter(|s| !s.is_empty());
        let requests = self.repository.requests.list(status).await?;
        self.enrichment.enrich_all(requests).await
    }

    /// The 50 most recent requests
    pub async fn list_recent(&self) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let requests = self.repository.requests.list_recent().await?;
        self.enrichment.enrich_all(requests).await
    }

    pub async fn list_by_equipment(&self, equipment_id: i64) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let requests = self.repository.requests.list_by_equipment(equipment_id).await?;
        self.enrichment.enrich_all(requests).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<MaintenanceRequestDetails> {
        let request = self.repository.requests.get_by_id(id).await?;
        self.enrichment.enrich_one(request).await
    }

    /// File a new request on behalf of `employee`
    pub async fn create(&self, employee: &str, data: &CreateMaintenanceRequest) -> AppResult<MaintenanceRequestDetails> {
        self.create_on(employee, data, Local::now().date_naive()).await
    }

    /// Same as `create`, with the request date defaulting to `today`
    pub async fn create_on(
        &self,
        employee: &str,
        data: &CreateMaintenanceRequest,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequestDetails> {
        let subject = data.subject.trim();
        if subject.is_empty() {
            return Err(AppError::Validation("Subject is required".to_string()));
        }
        check_dates(&data.scheduled_date, &data.due_date, &data.request_date)?;

        let mut category = non_blank(&data.category);
        if category.is_none() {
            if let Some(equipment_id) = data.equipment_id {
                category = self.repository.equipment.name_by_id(equipment_id).await?;
            }
        }

        let new_request = NewMaintenanceRequest {
            subject: subject.to_string(),
            employee: employee.to_string(),
            maintenance_for: data.maintenance_for,
            equipment_id: data.equipment_id,
            work_center_id: data.work_center_id,
            request_type: non_blank(&data.request_type).unwrap_or_else(|| DEFAULT_REQUEST_TYPE.to_string()),
            priority: non_blank(&data.priority).unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            description: non_blank(&data.description),
            scheduled_date: non_blank(&data.scheduled_date),
            due_date: non_blank(&data.due_date),
            company: non_blank(&data.company).unwrap_or_else(|| self.config.default_company.clone()),
            team: non_blank(&data.team),
            technician: non_blank(&data.technician),
            category,
            request_date: non_blank(&data.request_date)
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            duration: non_blank(&data.duration),
            notes: non_blank(&data.notes),
            instructions: non_blank(&data.instructions),
        };

        let request = self.repository.requests.create(&new_request).await?;
        tracing::info!("Request {} created by {}", request.id, employee);
        self.enrichment.enrich_one(request).await
    }

    /// Partial update of a request
    pub async fn update(&self, id: i64, data: &UpdateMaintenanceRequest) -> AppResult<MaintenanceRequestDetails> {
        let mut data = data.clone();
        if let Some(status) = data.status.take() {
            let status = status.trim().to_string();
            self.check_status(&status)?;
            data.status = Some(status);
        }
        if matches!(data.subject.as_deref(), Some(subject) if subject.trim().is_empty()) {
            return Err(AppError::Validation("Subject is required".to_string()));
        }
        check_dates(&data.scheduled_date, &data.due_date, &data.request_date)?;

        let request = self.repository.requests.update(id, &data).await?;
        tracing::info!("Request {} updated", id);
        self.enrichment.enrich_one(request).await
    }

    /// Move a request to another stage (status and stage together)
    pub async fn update_status(&self, id: i64, status: &str) -> AppResult<MaintenanceRequestDetails> {
        let status = status.trim();
        self.check_status(status)?;

        let request = self.repository.requests.update_status(id, status).await?;
        tracing::info!("Request {} moved to {}", id, status);
        self.enrichment.enrich_one(request).await
    }

    /// Delete a request and its comments
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.requests.delete(id).await?;
        tracing::info!("Request {} deleted", id);
        Ok(())
    }

    pub async fn list_comments(&self, request_id: i64) -> AppResult<Vec<WorksheetComment>> {
        self.repository.requests.list_comments(request_id).await
    }

    /// Attach a worksheet comment written by `user`
    pub async fn add_comment(&self, request_id: i64, user: &str, comment: &str) -> AppResult<WorksheetComment> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        if !self.repository.requests.exists(request_id).await? {
            return Err(AppError::NotFound(format!(
                "Maintenance request {} not found",
                request_id
            )));
        }

        let created = self.repository.requests.add_comment(request_id, user, comment).await?;
        tracing::debug!("Comment {} added to request {}", created.id, request_id);
        Ok(created)
    }

    fn check_status(&self, status: &str) -> AppResult<()> {
        if status.is_empty() {
            return Err(AppError::Validation("Status is required".to_string()));
        }
        if self.config.strict_status {
            status.parse::<RequestStatus>().map_err(AppError::Validation)?;
        }
        Ok(())
    }
}

/// Due and request dates must be `YYYY-MM-DD`; the schedule may also carry a time.
/// Blank values are left alone.
fn check_dates(
    scheduled_date: &Option<String>,
    due_date: &Option<String>,
    request_date: &Option<String>,
) -> AppResult<()> {
    if let Some(scheduled) = non_blank(scheduled_date) {
        let is_datetime = SCHEDULE_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(&scheduled, format).is_ok());
        if !is_datetime && parse_date(&scheduled).is_none() {
            return Err(AppError::Validation(format!("Invalid scheduled date: {}", scheduled)));
        }
    }
    for (label, value) in [("due date", due_date), ("request date", request_date)] {
        if let Some(value) = non_blank(value) {
            if parse_date(&value).is_none() {
                return Err(AppError::Validation(format!(
                    "Invalid {}: {} (expected YYYY-MM-DD)",
                    label, value
                )));
            }
        }
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(scheduled: Option<&str>, due: Option<&str>, requested: Option<&str>) -> AppResult<()> {
        check_dates(
            &scheduled.map(str::to_string),
            &due.map(str::to_string),
            &requested.map(str::to_string),
        )
    }

    #[test]
    fn test_plain_dates_and_schedule_times_are_accepted() {
        assert!(dates(Some("2024-05-01"), Some("2024-05-03"), Some("2024-04-30")).is_ok());
        assert!(dates(Some("2024-05-01 08:30:00"), None, None).is_ok());
        assert!(dates(Some("2024-05-01T08:30"), None, None).is_ok());
        assert!(dates(Some("  "), Some(""), None).is_ok());
    }

    #[test]
    fn test_digit_only_dates_are_rejected() {
        assert!(matches!(dates(None, Some("20240501"), None), Err(AppError::Validation(_))));
        assert!(matches!(dates(None, None, Some("20240501")), Err(AppError::Validation(_))));
        assert!(matches!(dates(Some("20240501"), None, None), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_due_date_does_not_take_a_time() {
        assert!(matches!(
            dates(None, Some("2024-05-01 08:30:00"), None),
            Err(AppError::Validation(_))
        ));
    }
}
