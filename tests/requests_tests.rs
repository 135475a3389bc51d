//! Request lifecycle, enrichment and dashboard figures through the services

mod common;

use chrono::NaiveDate;
use upkeep_server::{
    config::AppConfig,
    error::AppError,
    models::{
        equipment::{CreateTechnician, EquipmentInput},
        maintenance_request::{CreateMaintenanceRequest, UpdateMaintenanceRequest},
    },
    repository::{schema::ensure_schema, Repository},
    services::{reports::ReportRequest, Services},
};

const REQUESTER: &str = "ops@example.com";

fn request(subject: &str, equipment_id: Option<i64>) -> CreateMaintenanceRequest {
    CreateMaintenanceRequest {
        subject: subject.to_string(),
        equipment_id,
        ..Default::default()
    }
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let services = common::services().await;
    let pump = services
        .equipment
        .create(&EquipmentInput {
            name: "Pump A".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let created = services
        .requests
        .create_on(REQUESTER, &request("Leaking seal", Some(pump.id)), day("2024-03-04"))
        .await
        .unwrap();

    let stored = &created.request;
    assert_eq!(stored.employee, REQUESTER);
    assert_eq!(stored.status.as_deref(), Some("New"));
    assert_eq!(stored.stage.as_deref(), Some("New"));
    assert_eq!(stored.request_type.as_deref(), Some("Corrective"));
    assert_eq!(stored.priority.as_deref(), Some("Medium"));
    assert_eq!(stored.company.as_deref(), Some("My company"));
    assert_eq!(stored.maintenance_for.as_deref(), Some("Equipment"));
    assert_eq!(stored.request_date.as_deref(), Some("2024-03-04"));
    assert_eq!(stored.category.as_deref(), Some("Pump A"));
    assert_eq!(created.equipment_name.as_deref(), Some("Pump A"));
}

#[tokio::test]
async fn test_blank_subject_is_rejected() {
    let services = common::services().await;
    let result = services.requests.create(REQUESTER, &request("   ", None)).await;
    assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Subject is required"));
}

#[tokio::test]
async fn test_status_and_stage_move_together() {
    let services = common::services().await;
    let created = services.requests.create(REQUESTER, &request("Noise", None)).await.unwrap();
    let id = created.request.id;

    let moved = services.requests.update_status(id, "In Progress").await.unwrap();
    assert_eq!(moved.request.status.as_deref(), Some("In Progress"));
    assert_eq!(moved.request.stage.as_deref(), Some("In Progress"));

    let updated = services
        .requests
        .update(
            id,
            &UpdateMaintenanceRequest {
                status: Some("Repaired".to_string()),
                technician: Some("Ann".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.request.status.as_deref(), Some("Repaired"));
    assert_eq!(updated.request.stage.as_deref(), Some("Repaired"));
    assert_eq!(updated.request.technician.as_deref(), Some("Ann"));
    assert_eq!(updated.request.subject, "Noise");

    let unknown = services.requests.update_status(id, "Done").await;
    assert!(matches!(unknown, Err(AppError::Validation(_))));

    let missing = services.requests.update_status(id + 100, "Blocked").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let empty = services.requests.update(id, &UpdateMaintenanceRequest::default()).await;
    assert!(matches!(empty, Err(AppError::Validation(msg)) if msg == "No fields to update"));
}

#[tokio::test]
async fn test_update_trims_status_before_writing() {
    let services = common::services().await;
    let created = services.requests.create(REQUESTER, &request("Belt slip", None)).await.unwrap();

    let updated = services
        .requests
        .update(
            created.request.id,
            &UpdateMaintenanceRequest {
                status: Some("Repaired ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.request.status.as_deref(), Some("Repaired"));
    assert_eq!(updated.request.stage.as_deref(), Some("Repaired"));

    let stats = services.stats.dashboard().await.unwrap();
    assert_eq!(stats.status_breakdown.repaired, 1);

    let blank = services
        .requests
        .update(
            created.request.id,
            &UpdateMaintenanceRequest {
                status: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(blank, Err(AppError::Validation(msg)) if msg == "Status is required"));
}

#[tokio::test]
async fn test_digit_only_dates_are_rejected() {
    let services = common::services().await;

    let due = CreateMaintenanceRequest {
        due_date: Some("20240501".to_string()),
        ..request("Compressor check", None)
    };
    let result = services.requests.create(REQUESTER, &due).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let scheduled = CreateMaintenanceRequest {
        scheduled_date: Some("2024-05-01 08:30:00".to_string()),
        ..request("Compressor check", None)
    };
    let created = services.requests.create(REQUESTER, &scheduled).await.unwrap();

    let result = services
        .requests
        .update(
            created.request.id,
            &UpdateMaintenanceRequest {
                request_date: Some("20240501".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    let stored = services.requests.get_by_id(created.request.id).await.unwrap();
    assert_ne!(stored.request.request_date.as_deref(), Some("20240501"));
}

#[tokio::test]
async fn test_integer_dates_in_an_older_store_still_read() {
    let requests_pool = common::memory_pool().await;
    sqlx::query(
        r#"
        CREATE TABLE maintenance_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject TEXT NOT NULL,
            employee TEXT NOT NULL,
            technician TEXT,
            category TEXT,
            stage TEXT DEFAULT 'New',
            company TEXT NOT NULL DEFAULT 'My company',
            status TEXT DEFAULT 'New',
            scheduled_date DATE,
            due_date DATE,
            request_date DATE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&requests_pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO maintenance_requests (subject, employee, due_date, request_date) \
         VALUES ('Old compressor', 'ops@example.com', '20240501', '20240415')",
    )
    .execute(&requests_pool)
    .await
    .unwrap();

    let stored_type: String = sqlx::query_scalar("SELECT typeof(due_date) FROM maintenance_requests")
        .fetch_one(&requests_pool)
        .await
        .unwrap();
    assert_eq!(stored_type, "integer");

    let repository = Repository::new(common::memory_pool().await, common::memory_pool().await, requests_pool);
    ensure_schema(&repository).await.unwrap();
    let config = AppConfig::default();
    let services = Services::new(repository, config.auth.clone(), config.requests.clone());

    let listed = services.requests.list(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].request.due_date.as_deref(), Some("20240501"));
    assert_eq!(listed[0].request.request_date.as_deref(), Some("20240415"));

    let stats = services.stats.dashboard_stats_on(day("2024-06-01")).await.unwrap();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.open_requests, 1);
    assert_eq!(stats.overdue, 0);

    let view = services.stats.dashboard().await.unwrap();
    assert_eq!(view.recent_requests.len(), 1);
}

#[tokio::test]
async fn test_lenient_status_accepts_free_text() {
    let mut config = AppConfig::default();
    config.requests.strict_status = false;
    let services = common::services_with(config).await;

    let created = services.requests.create(REQUESTER, &request("Odd", None)).await.unwrap();
    let moved = services
        .requests
        .update_status(created.request.id, "Waiting for parts")
        .await
        .unwrap();
    assert_eq!(moved.request.stage.as_deref(), Some("Waiting for parts"));
}

#[tokio::test]
async fn test_delete_removes_comments() {
    let services = common::services().await;
    let created = services.requests.create(REQUESTER, &request("Belt", None)).await.unwrap();
    let id = created.request.id;

    services.requests.add_comment(id, "tech@example.com", "Ordered a belt").await.unwrap();
    services.requests.add_comment(id, "tech@example.com", "Fitted").await.unwrap();

    let comments = services.requests.list_comments(id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment, "Fitted");

    services.requests.delete(id).await.unwrap();
    assert!(matches!(services.requests.get_by_id(id).await, Err(AppError::NotFound(_))));
    assert!(services.requests.list_comments(id).await.unwrap().is_empty());

    services.requests.delete(id).await.unwrap();
}

#[tokio::test]
async fn test_comment_rules() {
    let services = common::services().await;

    let blank = services.requests.add_comment(1, "tech@example.com", "  ").await;
    assert!(matches!(blank, Err(AppError::Validation(_))));

    let orphan = services.requests.add_comment(1, "tech@example.com", "Hello").await;
    assert!(matches!(orphan, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_deleted_equipment_leaves_null_name() {
    let services = common::services().await;
    let pump = services
        .equipment
        .create(&EquipmentInput {
            name: "Pump A".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    services.requests.create(REQUESTER, &request("First", Some(pump.id))).await.unwrap();
    services.requests.create(REQUESTER, &request("Second", None)).await.unwrap();

    let listed = services.requests.list(None).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].request.subject, "Second");
    assert_eq!(listed[0].equipment_name, None);
    assert_eq!(listed[1].equipment_name.as_deref(), Some("Pump A"));

    services.equipment.delete(pump.id).await.unwrap();

    let listed = services.requests.list(None).await.unwrap();
    assert_eq!(listed[1].request.equipment_id, Some(pump.id));
    assert_eq!(listed[1].equipment_name, None);
    assert_eq!(services.requests.list_by_equipment(pump.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_filter_and_recent() {
    let services = common::services().await;
    let first = services.requests.create(REQUESTER, &request("One", None)).await.unwrap();
    services.requests.create(REQUESTER, &request("Two", None)).await.unwrap();
    services.requests.update_status(first.request.id, "Blocked").await.unwrap();

    let blocked = services.requests.list(Some("Blocked")).await.unwrap();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].request.subject, "One");

    assert_eq!(services.requests.list(Some("Scrap")).await.unwrap().len(), 0);
    assert_eq!(services.requests.list_recent().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_counts_critical_pump() {
    let services = common::services().await;
    let pump = services
        .equipment
        .create(&EquipmentInput {
            name: "Pump A".to_string(),
            health_percentage: Some(20),
            ..Default::default()
        })
        .await
        .unwrap();
    services
        .equipment
        .create(&EquipmentInput {
            name: "Lathe".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    services
        .technicians
        .create(&CreateTechnician {
            name: "Ann".to_string(),
            utilization_percentage: Some(60),
            status: None,
        })
        .await
        .unwrap();

    let overdue = CreateMaintenanceRequest {
        due_date: Some("2024-01-01".to_string()),
        ..request("Overdue pump", Some(pump.id))
    };
    services.requests.create(REQUESTER, &overdue).await.unwrap();
    let done = services.requests.create(REQUESTER, &request("Done", None)).await.unwrap();
    services.requests.update_status(done.request.id, "Repaired").await.unwrap();

    let stats = services.stats.dashboard_stats_on(day("2024-06-01")).await.unwrap();
    assert_eq!(stats.total_equipment, 2);
    assert_eq!(stats.total_requests, services.requests.list(None).await.unwrap().len() as i64);
    assert_eq!(stats.open_requests, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.overdue, 1);

    let view = services.stats.dashboard().await.unwrap();
    assert_eq!(view.critical_equipment, 1);
    assert_eq!(view.technician_utilization, 60);
    assert_eq!(view.status_breakdown.new, 1);
    assert_eq!(view.status_breakdown.repaired, 1);
    assert_eq!(view.status_breakdown.total, 2);
    assert_eq!(view.recent_requests.len(), 2);
    assert_eq!(services.equipment.count_critical().await.unwrap(), 1);
}

#[tokio::test]
async fn test_calendar_lists_scheduled_requests_only() {
    let services = common::services().await;
    let scheduled = CreateMaintenanceRequest {
        scheduled_date: Some("2024-05-01 08:30:00".to_string()),
        ..request("Inspection", None)
    };
    services.requests.create(REQUESTER, &scheduled).await.unwrap();
    services.requests.create(REQUESTER, &request("Unscheduled", None)).await.unwrap();

    let view = services.calendar.view().await.unwrap();
    assert_eq!(view.scheduled_requests.len(), 1);
    assert_eq!(view.scheduled_requests[0].subject, "Inspection");
    assert_eq!(view.scheduled_requests[0].scheduled_date, "2024-05-01 08:30:00");
}

#[tokio::test]
async fn test_reports_read_the_stores() {
    let services = common::services().await;
    services
        .equipment
        .create(&EquipmentInput {
            name: "Pump, main".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let report = services
        .reports
        .generate(&ReportRequest {
            report_type: "equipment_status".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(report.success);
    assert_eq!(report.table_data.len(), 1);
    assert!(report.csv_content.contains("\"Pump, main\""));

    let invalid = services
        .reports
        .generate(&ReportRequest {
            report_type: "inventory".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(invalid, Err(AppError::BadRequest(msg)) if msg == "Invalid report type"));

    let bad_date = services
        .reports
        .generate(&ReportRequest {
            report_type: "maintenance_requests".to_string(),
            start_date: Some("01/02/2024".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_date, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_overdue_report_includes_old_open_request() {
    let services = common::services().await;
    let old = CreateMaintenanceRequest {
        due_date: Some("2020-01-01".to_string()),
        ..request("Old valve", None)
    };
    let created = services.requests.create(REQUESTER, &old).await.unwrap();
    let done = CreateMaintenanceRequest {
        due_date: Some("2020-01-01".to_string()),
        ..request("Closed valve", None)
    };
    let closed = services.requests.create(REQUESTER, &done).await.unwrap();
    services.requests.update_status(closed.request.id, "Repaired").await.unwrap();

    let report = services
        .reports
        .generate(&ReportRequest {
            report_type: "overdue_requests".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(report.table_data.len(), 1);
    assert_eq!(report.table_data[0]["ID"], created.request.id);
}
