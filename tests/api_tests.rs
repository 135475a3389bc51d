//! HTTP tests driving the router in-process

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.call(Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_protected_routes_require_a_session() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/equipment", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app.call(Method::GET, "/requests", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_rules() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({
                "full_name": "Ann",
                "email": "ann@example.com",
                "password": "weak",
                "confirm_password": "weak",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("uppercase"));

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({
                "full_name": "Ann",
                "email": "ann@example.com",
                "password": TEST_PASSWORD,
                "confirm_password": "Other#Pass1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Passwords do not match");

    app.login_as("ann@example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({
                "full_name": "Ann",
                "email": "ann@example.com",
                "password": TEST_PASSWORD,
                "confirm_password": TEST_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists. Please use a different email.");
}

#[tokio::test]
async fn test_login_failures_and_session_cookie() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Account not exist");

    let token = app.login_as("ben@example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "ben@example.com", "password": "Wrong#Pass12" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid Password");

    let response = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "ben@example.com", "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let (status, body) = app.call(Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ben@example.com");

    let (status, body) = app.call(Method::POST, "/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_forgot_password() {
    let app = TestApp::new().await;
    app.login_as("cat@example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/forgot-password",
            None,
            Some(json!({ "email": "cat@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset link has been sent to your email address.");

    let (status, _) = app
        .call(
            Method::POST,
            "/auth/forgot-password",
            None,
            Some(json!({ "email": "ghost@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_lifecycle_over_http() {
    let app = TestApp::new().await;
    let token = app.login_as("ops@example.com").await;

    let (status, pump) = app
        .call(
            Method::POST,
            "/equipment",
            Some(&token),
            Some(json!({ "name": "Pump A", "health_percentage": 20 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let pump_id = pump["id"].as_i64().unwrap();

    let (status, body) = app
        .call(Method::POST, "/requests", Some(&token), Some(json!({ "subject": "Leak" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select an equipment");

    let (status, body) = app
        .call(
            Method::POST,
            "/requests",
            Some(&token),
            Some(json!({ "subject": "Leak", "maintenance_for": "Work Center", "work_center_id": 99 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select a work center");

    let (status, created) = app
        .call(
            Method::POST,
            "/requests",
            Some(&token),
            Some(json!({ "subject": "Leak", "equipment_id": pump_id, "priority": "High" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["employee"], "ops@example.com");
    assert_eq!(created["status"], "New");
    assert_eq!(created["equipment_name"], "Pump A");
    let id = created["id"].as_i64().unwrap();

    let (status, moved) = app
        .call(
            Method::PUT,
            &format!("/requests/{}/status", id),
            Some(&token),
            Some(json!({ "status": "In Progress" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["stage"], "In Progress");

    let (status, comment) = app
        .call(
            Method::POST,
            &format!("/requests/{}/comments", id),
            Some(&token),
            Some(json!({ "comment": "Replaced gasket" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["user"], "ops@example.com");

    let (status, listed) = app
        .call(Method::GET, "/requests?status=In%20Progress", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, for_pump) = app
        .call(Method::GET, &format!("/equipment/{}/requests", pump_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(for_pump.as_array().unwrap().len(), 1);

    let (status, dashboard) = app.call(Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["critical_equipment"], 1);
    assert_eq!(dashboard["stats"]["in_progress"], 1);

    let (status, _) = app
        .call(Method::DELETE, &format!("/requests/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .call(Method::GET, &format!("/requests/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_work_center_request_target() {
    let app = TestApp::new().await;
    let token = app.login_as("wc@example.com").await;

    let (status, center) = app
        .call(Method::POST, "/work-centers", Some(&token), Some(json!({ "name": "Assembly" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, created) = app
        .call(
            Method::POST,
            "/requests",
            Some(&token),
            Some(json!({
                "subject": "Line stop",
                "maintenance_for": "Work Center",
                "work_center_id": center["id"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["maintenance_for"], "Work Center");
    assert!(created["equipment_name"].is_null());
}

#[tokio::test]
async fn test_csv_report_export() {
    let app = TestApp::new().await;
    let token = app.login_as("rep@example.com").await;

    app.call(Method::POST, "/equipment", Some(&token), Some(json!({ "name": "Lathe" })))
        .await;

    let response = app
        .send(
            Method::POST,
            "/reports",
            Some(&token),
            Some(json!({ "report_type": "equipment_status", "export_format": "csv" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));

    let (status, body) = app
        .call_raw(
            Method::POST,
            "/reports",
            Some(&token),
            Some(json!({ "report_type": "equipment_status", "export_format": "csv" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("ID,Name,Health,Status,Created"));
    assert!(text.contains("Lathe,100%,active"));

    let (status, body) = app
        .call(Method::POST, "/reports", Some(&token), Some(json!({ "report_type": "bogus" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid report type");
}

#[tokio::test]
async fn test_users_listing() {
    let app = TestApp::new().await;
    let token = app.login_as("dee@example.com").await;

    let (status, users) = app.call(Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users[0]["email"], "dee@example.com");
    assert!(users[0].get("password").is_none());

    let (status, signups) = app.call(Method::GET, "/users/signups", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signups[0]["count"], 1);
}
