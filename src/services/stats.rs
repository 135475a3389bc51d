//! Dashboard counters and request aggregations
//!
//! The functions at the top of this module are pure: they work on a snapshot
//! of requests and take "today" as an argument. `StatsService` gathers the
//! snapshot from the stores.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        enums::RequestStatus,
        maintenance_request::{MaintenanceRequest, MaintenanceRequestDetails},
    },
    repository::Repository,
};

use super::enrichment::EnrichmentService;

pub const UNASSIGNED: &str = "Unassigned";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_equipment: i64,
    /// New + In Progress
    pub open_requests: i64,
    pub in_progress: i64,
    /// Repaired
    pub completed: i64,
    pub total_requests: i64,
    pub overdue: i64,
}

/// Requests per known status. Unknown statuses only count towards `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusBreakdown {
    pub new: i64,
    pub in_progress: i64,
    pub blocked: i64,
    pub ready_for_next_stage: i64,
    pub repaired: i64,
    pub scrap: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TechnicianPerformance {
    pub technician: String,
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub new: i64,
    /// completed / total * 100, 0 when total is 0
    pub completion_rate: f64,
}

/// Inclusive date bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Filter on a stored date string: rows without a date are kept, rows
    /// whose date cannot be read are left out
    pub fn admits(&self, value: Option<&str>) -> bool {
        if self.is_open() {
            return true;
        }
        match value.map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(text) => parse_date(text).map_or(false, |date| self.contains(date)),
        }
    }
}

/// Parse a stored `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn status_of(request: &MaintenanceRequest) -> Option<RequestStatus> {
    request.status_str().parse().ok()
}

// ---------------------------------------------------------------------------
// Pure aggregations
// ---------------------------------------------------------------------------

/// Due date passed and the work has not ended
pub fn is_overdue(request: &MaintenanceRequest, today: NaiveDate) -> bool {
    let Some(due) = request.due_date.as_deref().and_then(parse_date) else {
        return false;
    };
    let terminal = status_of(request).map_or(false, |status| status.is_terminal());
    due < today && !terminal
}

pub fn dashboard_stats(requests: &[MaintenanceRequest], total_equipment: i64, today: NaiveDate) -> DashboardStats {
    let mut stats = DashboardStats {
        total_equipment,
        total_requests: requests.len() as i64,
        ..Default::default()
    };

    for request in requests {
        match status_of(request) {
            Some(RequestStatus::New) => stats.open_requests += 1,
            Some(RequestStatus::InProgress) => {
                stats.open_requests += 1;
                stats.in_progress += 1;
            }
            Some(RequestStatus::Repaired) => stats.completed += 1,
            _ => {}
        }
        if is_overdue(request, today) {
            stats.overdue += 1;
        }
    }

    stats
}

pub fn status_breakdown<'a, I>(requests: I) -> StatusBreakdown
where
    I: IntoIterator<Item = &'a MaintenanceRequest>,
{
    let mut breakdown = StatusBreakdown::default();

    for request in requests {
        breakdown.total += 1;
        match status_of(request) {
            Some(RequestStatus::New) => breakdown.new += 1,
            Some(RequestStatus::InProgress) => breakdown.in_progress += 1,
            Some(RequestStatus::Blocked) => breakdown.blocked += 1,
            Some(RequestStatus::ReadyForNextStage) => breakdown.ready_for_next_stage += 1,
            Some(RequestStatus::Repaired) => breakdown.repaired += 1,
            Some(RequestStatus::Scrap) => breakdown.scrap += 1,
            None => {}
        }
    }

    breakdown
}

/// Open requests whose due date is strictly before today, optionally
/// restricted to due dates inside `range`
pub fn overdue_requests<'a>(
    requests: &'a [MaintenanceRequest],
    range: Option<&DateRange>,
    today: NaiveDate,
) -> Vec<&'a MaintenanceRequest> {
    requests
        .iter()
        .filter(|request| status_of(request).map_or(false, |status| status.is_open_work()))
        .filter(|request| {
            let Some(due) = request.due_date.as_deref().and_then(parse_date) else {
                return false;
            };
            due < today && range.map_or(true, |range| range.contains(due))
        })
        .collect()
}

/// Per-technician counters, sorted by technician name
pub fn technician_performance<'a, I>(requests: I) -> Vec<TechnicianPerformance>
where
    I: IntoIterator<Item = &'a MaintenanceRequest>,
{
    let mut groups: BTreeMap<String, (i64, i64, i64, i64)> = BTreeMap::new();

    for request in requests {
        let technician = request
            .technician
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED)
            .to_string();

        let entry = groups.entry(technician).or_default();
        entry.0 += 1;
        match status_of(request) {
            Some(RequestStatus::Repaired) => entry.1 += 1,
            Some(RequestStatus::InProgress) => entry.2 += 1,
            Some(RequestStatus::New) => entry.3 += 1,
            _ => {}
        }
    }

    groups
        .into_iter()
        .map(|(technician, (total, completed, in_progress, new))| TechnicianPerformance {
            technician,
            total,
            completed,
            in_progress,
            new,
            completion_rate: percentage(completed, total),
        })
        .collect()
}

/// part / whole * 100, 0 when whole is 0
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Everything the dashboard page shows
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardView {
    pub stats: DashboardStats,
    /// Equipment with health below 30%
    pub critical_equipment: i64,
    /// Average technician utilization, percent
    pub technician_utilization: i64,
    pub status_breakdown: StatusBreakdown,
    pub recent_requests: Vec<MaintenanceRequestDetails>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    enrichment: EnrichmentService,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            enrichment: EnrichmentService::new(repository.clone()),
            repository,
        }
    }

    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        self.dashboard_stats_on(Local::now().date_naive()).await
    }

    pub async fn dashboard_stats_on(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let requests = self.repository.requests.list(None).await?;
        let total_equipment = self.repository.equipment.count().await?;
        Ok(dashboard_stats(&requests, total_equipment, today))
    }

    pub async fn status_breakdown(&self) -> AppResult<StatusBreakdown> {
        let requests = self.repository.requests.list(None).await?;
        Ok(status_breakdown(&requests))
    }

    pub async fn dashboard(&self) -> AppResult<DashboardView> {
        let today = Local::now().date_naive();

        let requests = self.repository.requests.list(None).await?;
        let total_equipment = self.repository.equipment.count().await?;
        let critical_equipment = self.repository.equipment.count_critical().await?;
        let technician_utilization = self.repository.technicians.average_utilization().await?;
        let recent = self.repository.requests.list_recent().await?;

        Ok(DashboardView {
            stats: dashboard_stats(&requests, total_equipment, today),
            critical_equipment,
            technician_utilization,
            status_breakdown: status_breakdown(&requests),
            recent_requests: self.enrichment.enrich_all(recent).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: i64, status: &str) -> MaintenanceRequest {
        MaintenanceRequest {
            id,
            subject: format!("Request {}", id),
            employee: "ops@example.com".to_string(),
            technician: None,
            category: None,
            stage: Some(status.to_string()),
            company: Some("My company".to_string()),
            status: Some(status.to_string()),
            request_type: Some("Corrective".to_string()),
            priority: Some("Medium".to_string()),
            description: None,
            scheduled_date: None,
            due_date: None,
            equipment_id: None,
            work_center_id: None,
            maintenance_for: Some("Equipment".to_string()),
            notes: None,
            instructions: None,
            team: None,
            request_date: None,
            duration: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn due(mut request: MaintenanceRequest, date: &str) -> MaintenanceRequest {
        request.due_date = Some(date.to_string());
        request
    }

    fn day(text: &str) -> NaiveDate {
        parse_date(text).unwrap()
    }

    #[test]
    fn test_overdue_yesterday_counts_unless_repaired() {
        let today = day("2024-05-10");
        let open = due(request(1, "New"), "2024-05-09");
        let done = due(request(2, "Repaired"), "2024-05-09");

        assert_eq!(dashboard_stats(&[open.clone()], 0, today).overdue, 1);
        assert_eq!(dashboard_stats(&[done], 0, today).overdue, 0);
        // due today is not overdue yet
        assert_eq!(dashboard_stats(&[due(request(3, "New"), "2024-05-10")], 0, today).overdue, 0);
    }

    #[test]
    fn test_dashboard_counts() {
        let requests = vec![
            request(1, "New"),
            request(2, "In Progress"),
            request(3, "Repaired"),
            request(4, "Scrap"),
            due(request(5, "Blocked"), "2020-01-01"),
        ];
        let stats = dashboard_stats(&requests, 7, day("2024-01-01"));

        assert_eq!(
            stats,
            DashboardStats {
                total_equipment: 7,
                open_requests: 2,
                in_progress: 1,
                completed: 1,
                total_requests: 5,
                overdue: 1,
            }
        );
    }

    #[test]
    fn test_status_breakdown_ignores_unknown_in_buckets() {
        let requests = vec![request(1, "New"), request(2, "Repaired"), request(3, "Done")];
        let breakdown = status_breakdown(&requests);

        assert_eq!(breakdown.new, 1);
        assert_eq!(breakdown.repaired, 1);
        assert_eq!(breakdown.in_progress, 0);
        assert_eq!(breakdown.total, 3);
    }

    #[test]
    fn test_overdue_requests_filters() {
        let today = day("2024-05-10");
        let requests = vec![
            due(request(1, "New"), "2020-01-01"),
            due(request(2, "Ready for next stage"), "2024-05-01"),
            due(request(3, "Scrap"), "2020-01-01"),
            due(request(4, "New"), "not a date"),
            due(request(5, "In Progress"), "2024-06-01"),
            request(6, "New"),
        ];

        let ids: Vec<i64> = overdue_requests(&requests, None, today).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let range = DateRange::new(Some(day("2024-01-01")), None);
        let ids: Vec<i64> = overdue_requests(&requests, Some(&range), today)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_technician_performance_groups_and_sorts() {
        let mut a = request(1, "Repaired");
        a.technician = Some("Zoe".to_string());
        let mut b = request(2, "In Progress");
        b.technician = Some("Zoe".to_string());
        let mut c = request(3, "New");
        c.technician = Some("  ".to_string());
        let d = request(4, "Blocked");

        let rows = technician_performance(&[a, b, c, d]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].technician, UNASSIGNED);
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[0].new, 1);
        assert_eq!(rows[0].completion_rate, 0.0);
        assert_eq!(rows[1].technician, "Zoe");
        assert_eq!(rows[1].completed, 1);
        assert_eq!(rows[1].in_progress, 1);
        assert_eq!(rows[1].completion_rate, 50.0);
    }

    #[test]
    fn test_date_range_admits() {
        let range = DateRange::new(Some(day("2024-01-01")), Some(day("2024-01-31")));
        assert!(range.admits(Some("2024-01-15")));
        assert!(range.admits(Some("2024-01-31")));
        assert!(!range.admits(Some("2024-02-01")));
        assert!(!range.admits(Some("garbage")));
        assert!(range.admits(None));
        assert!(DateRange::default().admits(Some("garbage")));
    }

    #[test]
    fn test_percentage_of_zero_is_zero() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
