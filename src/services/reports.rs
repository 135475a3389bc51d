//! Tabular reports with a CSV rendering
//!
//! Each report is built as an ordered table of named cells; the CSV text is
//! always derived from that same table, so the two never disagree.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{Equipment, EquipmentCategory},
        maintenance_request::MaintenanceRequest,
        work_center::WorkCenter,
    },
    repository::{work_centers::DEFAULT_WORK_CENTER_COMPANY, Repository},
};

use super::stats::{self, DateRange};

/// One report row: column name to cell value, in column order
pub type ReportRow = IndexMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    MaintenanceRequests,
    EquipmentStatus,
    StatusSummary,
    OverdueRequests,
    TechnicianPerformance,
    WorkCenters,
    EquipmentCategories,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::MaintenanceRequests => "maintenance_requests",
            ReportKind::EquipmentStatus => "equipment_status",
            ReportKind::StatusSummary => "status_summary",
            ReportKind::OverdueRequests => "overdue_requests",
            ReportKind::TechnicianPerformance => "technician_performance",
            ReportKind::WorkCenters => "work_centers",
            ReportKind::EquipmentCategories => "equipment_categories",
        }
    }
}

impl FromStr for ReportKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintenance_requests" => Ok(ReportKind::MaintenanceRequests),
            "equipment_status" => Ok(ReportKind::EquipmentStatus),
            "status_summary" => Ok(ReportKind::StatusSummary),
            "overdue_requests" => Ok(ReportKind::OverdueRequests),
            "technician_performance" => Ok(ReportKind::TechnicianPerformance),
            "work_centers" => Ok(ReportKind::WorkCenters),
            "equipment_categories" => Ok(ReportKind::EquipmentCategories),
            _ => Err(AppError::BadRequest("Invalid report type".to_string())),
        }
    }
}

/// Report generation request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReportRequest {
    pub report_type: String,
    /// YYYY-MM-DD, inclusive
    pub start_date: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub end_date: Option<String>,
    /// Exact status match (maintenance_requests only)
    pub status_filter: Option<String>,
    /// `csv` returns the CSV text directly; anything else returns JSON
    pub export_format: Option<String>,
}

impl ReportRequest {
    pub fn wants_csv(&self) -> bool {
        self.export_format
            .as_deref()
            .map_or(false, |format| format.eq_ignore_ascii_case("csv"))
    }

    pub fn date_range(&self) -> AppResult<DateRange> {
        Ok(DateRange::new(
            parse_bound(self.start_date.as_deref(), "start_date")?,
            parse_bound(self.end_date.as_deref(), "end_date")?,
        ))
    }

    fn status_filter(&self) -> Option<&str> {
        self.status_filter
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn parse_bound(value: Option<&str>, field: &str) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(text) => stats::parse_date(text)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{} must be a YYYY-MM-DD date", field))),
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Report {
    pub success: bool,
    pub report_title: String,
    #[schema(value_type = Vec<Object>)]
    pub table_data: Vec<ReportRow>,
    pub csv_content: String,
}

impl Report {
    pub fn new(title: &str, table_data: Vec<ReportRow>) -> Self {
        let csv_content = to_csv(&table_data);
        Self {
            success: true,
            report_title: title.to_string(),
            table_data,
            csv_content,
        }
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Render a table as CSV. The header is the first row's column names; an
/// empty table renders as an empty string.
pub fn to_csv(table: &[ReportRow]) -> String {
    let Some(first) = table.first() else {
        return String::new();
    };

    let mut out = String::new();
    let header: Vec<String> = first.keys().map(|key| escape_field(key)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in table {
        let cells: Vec<String> = first
            .keys()
            .map(|key| escape_field(&cell_text(row.get(key).unwrap_or(&Value::Null))))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// String form of a cell as it appears in CSV
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ---------------------------------------------------------------------------
// Report builders
// ---------------------------------------------------------------------------

fn row<const N: usize>(cells: [(&str, Value); N]) -> ReportRow {
    cells
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn text_or(value: Option<&str>, fallback: &str) -> Value {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => json!(text),
        None => json!(fallback),
    }
}

pub fn maintenance_requests_report(
    requests: &[MaintenanceRequest],
    range: &DateRange,
    status_filter: Option<&str>,
) -> Report {
    let table = requests
        .iter()
        .filter(|request| range.admits(request.request_date.as_deref()))
        .filter(|request| status_filter.map_or(true, |status| request.status_str() == status))
        .map(|request| {
            row([
                ("ID", json!(request.id)),
                ("Subject", json!(request.subject)),
                ("Employee", json!(request.employee)),
                ("Technician", text_or(request.technician.as_deref(), "Unassigned")),
                ("Status", json!(request.status)),
                ("Priority", json!(request.priority)),
                ("Request Date", text_or(request.request_date.as_deref(), "N/A")),
                ("Scheduled Date", text_or(request.scheduled_date.as_deref(), "N/A")),
            ])
        })
        .collect();

    Report::new("Maintenance Requests Report", table)
}

pub fn equipment_status_report(equipment: &[Equipment]) -> Report {
    let table = equipment
        .iter()
        .map(|item| {
            let created = item
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "N/A".to_string());
            row([
                ("ID", json!(item.id)),
                ("Name", json!(item.name)),
                ("Health", json!(format!("{}%", item.health_percentage))),
                ("Status", json!(item.status)),
                ("Created", json!(created)),
            ])
        })
        .collect();

    Report::new("Equipment Status Report", table)
}

/// Count and share of every status actually present, sorted by status
pub fn status_summary_report(requests: &[MaintenanceRequest]) -> Report {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for request in requests {
        let status = request.status.clone().unwrap_or_else(|| "Unknown".to_string());
        *counts.entry(status).or_default() += 1;
    }

    let total = requests.len() as i64;
    let table = counts
        .into_iter()
        .map(|(status, count)| {
            row([
                ("Status", json!(status)),
                ("Count", json!(count)),
                ("Percentage", json!(format!("{:.1}%", stats::percentage(count, total)))),
            ])
        })
        .collect();

    Report::new("Status Summary Report", table)
}

pub fn overdue_requests_report(requests: &[MaintenanceRequest], range: &DateRange, today: NaiveDate) -> Report {
    let table = stats::overdue_requests(requests, Some(range), today)
        .into_iter()
        .map(|request| {
            row([
                ("ID", json!(request.id)),
                ("Subject", json!(request.subject)),
                ("Employee", json!(request.employee)),
                ("Due Date", text_or(request.due_date.as_deref(), "N/A")),
                ("Status", json!(request.status)),
                ("Priority", json!(request.priority)),
            ])
        })
        .collect();

    Report::new("Overdue Requests Report", table)
}

/// Performance over requests whose request date falls inside `range`
pub fn technician_performance_report(requests: &[MaintenanceRequest], range: &DateRange) -> Report {
    let in_range = requests
        .iter()
        .filter(|request| range.admits(request.request_date.as_deref()));

    let table = stats::technician_performance(in_range)
        .into_iter()
        .map(|perf| {
            row([
                ("Technician", json!(perf.technician)),
                ("Total Requests", json!(perf.total)),
                ("Completed", json!(perf.completed)),
                ("In Progress", json!(perf.in_progress)),
                ("New", json!(perf.new)),
                ("Completion Rate", json!(format!("{:.1}%", perf.completion_rate))),
            ])
        })
        .collect();

    Report::new("Technician Performance Report", table)
}

pub fn work_centers_report(work_centers: &[WorkCenter]) -> Report {
    let table = work_centers
        .iter()
        .map(|center| {
            row([
                ("Name", json!(center.name)),
                ("Code", json!(center.code.clone().unwrap_or_default())),
                ("Cost per hour", json!(center.cost_per_hour.unwrap_or(0.0))),
                (
                    "Capacity Time Efficiency",
                    json!(center.capacity_time_efficiency.unwrap_or(100.0)),
                ),
                ("OEE Target", json!(center.oee_target.unwrap_or(0.0))),
                (
                    "Company",
                    text_or(center.company.as_deref(), DEFAULT_WORK_CENTER_COMPANY),
                ),
            ])
        })
        .collect();

    Report::new("Work Centers Report", table)
}

pub fn equipment_categories_report(categories: &[EquipmentCategory]) -> Report {
    let table = categories
        .iter()
        .map(|category| {
            row([
                ("Name", json!(category.name)),
                ("Responsible", json!(category.responsible.clone().unwrap_or_default())),
                (
                    "Company",
                    text_or(category.company.as_deref(), DEFAULT_WORK_CENTER_COMPANY),
                ),
            ])
        })
        .collect();

    Report::new("Equipment Categories Report", table)
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn generate(&self, request: &ReportRequest) -> AppResult<Report> {
        let kind: ReportKind = request.report_type.trim().parse()?;
        let range = request.date_range()?;
        let today = Local::now().date_naive();

        tracing::debug!("Generating {} report", kind.as_str());

        let report = match kind {
            ReportKind::MaintenanceRequests => {
                let requests = self.repository.requests.list(None).await?;
                maintenance_requests_report(&requests, &range, request.status_filter())
            }
            ReportKind::EquipmentStatus => {
                let equipment = self.repository.equipment.list().await?;
                equipment_status_report(&equipment)
            }
            ReportKind::StatusSummary => {
                let requests = self.repository.requests.list(None).await?;
                status_summary_report(&requests)
            }
            ReportKind::OverdueRequests => {
                let requests = self.repository.requests.list(None).await?;
                overdue_requests_report(&requests, &range, today)
            }
            ReportKind::TechnicianPerformance => {
                let requests = self.repository.requests.list(None).await?;
                technician_performance_report(&requests, &range)
            }
            ReportKind::WorkCenters => {
                let work_centers = self.repository.work_centers.list().await?;
                work_centers_report(&work_centers)
            }
            ReportKind::EquipmentCategories => {
                let categories = self.repository.equipment_categories.list().await?;
                equipment_categories_report(&categories)
            }
        };

        Ok(report)
    }
}
