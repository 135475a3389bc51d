//! Calendar projection of scheduled requests

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::maintenance_request::MaintenanceRequestDetails,
    repository::Repository,
};

use super::enrichment::EnrichmentService;

const DEFAULT_SLOT_TIME: &str = "09:00:00";

/// One scheduled request placed on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScheduledEntry {
    pub id: i64,
    pub subject: String,
    pub employee: String,
    pub technician: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`, or the stored value when it had its own time
    pub scheduled_date: String,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub equipment_name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarView {
    pub scheduled_requests: Vec<ScheduledEntry>,
    /// YYYY-MM-DD
    pub current_date: String,
    /// HH:MM
    pub current_time: String,
    /// Monday of the current week, YYYY-MM-DD
    pub week_start: String,
}

/// Normalise a stored scheduled date for display. Returns None when there is
/// nothing to schedule (blank or the literal "none").
pub fn normalize_schedule(scheduled: &str, created_at: Option<NaiveDateTime>) -> Option<String> {
    let scheduled = scheduled.trim();
    if scheduled.is_empty() || scheduled.eq_ignore_ascii_case("none") {
        return None;
    }

    if scheduled.len() == 10 && !scheduled.contains(' ') && !scheduled.contains('T') {
        let time = created_at
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| DEFAULT_SLOT_TIME.to_string());
        return Some(format!("{} {}", scheduled, time));
    }

    Some(scheduled.replace('T', " "))
}

/// Requests that have a schedule, in listing order
pub fn schedule_projection(requests: &[MaintenanceRequestDetails]) -> Vec<ScheduledEntry> {
    requests
        .iter()
        .filter_map(|details| {
            let request = &details.request;
            let scheduled_date = request
                .scheduled_date
                .as_deref()
                .and_then(|value| normalize_schedule(value, request.created_at))?;

            Some(ScheduledEntry {
                id: request.id,
                subject: request.subject.clone(),
                employee: request.employee.clone(),
                technician: request.technician.clone(),
                scheduled_date,
                due_date: request.due_date.clone(),
                status: request.status.clone(),
                priority: request.priority.clone(),
                equipment_name: details.equipment_name.clone(),
                created_at: request.created_at,
            })
        })
        .collect()
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[derive(Clone)]
pub struct CalendarService {
    repository: Repository,
    enrichment: EnrichmentService,
}

impl CalendarService {
    pub fn new(repository: Repository) -> Self {
        Self {
            enrichment: EnrichmentService::new(repository.clone()),
            repository,
        }
    }

    pub async fn view(&self) -> AppResult<CalendarView> {
        let requests = self.repository.requests.list(None).await?;
        let requests = self.enrichment.enrich_all(requests).await?;
        let now = Local::now().naive_local();

        Ok(CalendarView {
            scheduled_requests: schedule_projection(&requests),
            current_date: now.format("%Y-%m-%d").to_string(),
            current_time: now.format("%H:%M").to_string(),
            week_start: week_start(now.date()).format("%Y-%m-%d").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_date_only_borrows_created_time() {
        assert_eq!(
            normalize_schedule("2024-05-01", Some(at("2024-04-20 14:35:12"))),
            Some("2024-05-01 14:35:12".to_string())
        );
    }

    #[test]
    fn test_date_only_without_created_at_defaults_to_nine() {
        assert_eq!(
            normalize_schedule("2024-05-01", None),
            Some("2024-05-01 09:00:00".to_string())
        );
    }

    #[test]
    fn test_t_separator_is_replaced() {
        assert_eq!(
            normalize_schedule("2024-05-01T08:30", None),
            Some("2024-05-01 08:30".to_string())
        );
        assert_eq!(
            normalize_schedule("2024-05-01 08:30:00", Some(at("2024-04-20 14:35:12"))),
            Some("2024-05-01 08:30:00".to_string())
        );
    }

    #[test]
    fn test_blank_and_none_are_skipped() {
        assert_eq!(normalize_schedule("   ", None), None);
        assert_eq!(normalize_schedule("None", None), None);
    }

    #[test]
    fn test_week_start_is_monday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(week_start(sunday), monday);
        assert_eq!(week_start(monday), monday);
    }
}
