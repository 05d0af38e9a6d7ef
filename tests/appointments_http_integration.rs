//! Integration tests for the appointment and notification endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use nnia::adapters::ai::MockAssistantGateway;
use nnia::adapters::http::nnia::{nnia_router, NniaAppState};
use nnia::adapters::memory::InMemoryStore;
use nnia::domain::business::BusinessProfile;
use nnia::domain::foundation::{AppointmentId, BusinessInfoId, ClientId, NotificationId};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    client_id: ClientId,
    business_info_id: BusinessInfoId,
}

fn app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let client_id = store.seed_client("owner@example.com", Some("Pan y Sal"));
    let business_info_id = store.seed_business_info(client_id, BusinessProfile::default());

    let state = NniaAppState {
        business_info: store.clone(),
        appointments: store.clone(),
        notifications: store.clone(),
        gateway: Arc::new(MockAssistantGateway::new()),
        shutdown: CancellationToken::new(),
    };

    TestApp {
        router: nnia_router(state),
        store,
        client_id,
        business_info_id,
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn booking(client_id: ClientId, date: &str, time: &str) -> Value {
    json!({
        "clientId": client_id.to_string(),
        "name": "Ana",
        "email": "ana@example.com",
        "type": "call",
        "date": date,
        "time": time,
        "origin": "web"
    })
}

async fn create(app: &TestApp, body: Value) -> Value {
    let (status, body) = send(&app.router, Method::POST, "/nnia/appointments", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body["appointment"].clone()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_defaults_status_to_pending() {
    let app = app();

    let appointment = create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;

    assert_eq!(appointment["status"], json!("pending"));
    assert_eq!(app.store.appointments()[0].status, "pending");
}

#[tokio::test]
async fn create_keeps_supplied_status() {
    let app = app();
    let mut body = booking(app.client_id, "2025-07-01", "09:00");
    body["status"] = json!("confirmed");

    let appointment = create(&app, body).await;

    assert_eq!(appointment["status"], json!("confirmed"));
}

#[tokio::test]
async fn create_notifies_owner_by_business_info_id() {
    let app = app();

    create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;

    let notifications = app.store.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(&notifications[0].client_id, app.business_info_id.as_uuid());
}

#[tokio::test]
async fn create_succeeds_when_notification_fails() {
    let app = app();
    app.store.fail_notifications(true);

    let appointment = create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;

    assert!(appointment["id"].is_string());
    assert_eq!(app.store.appointments().len(), 1);
    assert!(app.store.notifications().is_empty());
}

#[tokio::test]
async fn create_requires_date() {
    let app = app();
    let mut body = booking(app.client_id, "", "09:00");
    body.as_object_mut().unwrap().remove("date");

    let (status, body) = send(&app.router, Method::POST, "/nnia/appointments", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(app.store.appointments().is_empty());
}

#[tokio::test]
async fn store_failure_is_500() {
    let app = app();
    app.store.set_unavailable(true);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/nnia/appointments",
        Some(booking(app.client_id, "2025-07-01", "09:00")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn list_orders_by_date_then_time() {
    let app = app();
    create(&app, booking(app.client_id, "2025-07-02", "08:00")).await;
    create(&app, booking(app.client_id, "2025-07-01", "10:00")).await;
    create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/nnia/appointments?clientId={}", app.client_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let slots: Vec<(String, String)> = body["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["date"].as_str().unwrap().to_string(),
                a["time"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        slots,
        vec![
            ("2025-07-01".to_string(), "09:00".to_string()),
            ("2025-07-01".to_string(), "10:00".to_string()),
            ("2025-07-02".to_string(), "08:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn list_requires_client_id() {
    let app = app();

    let (status, _) = send(&app.router, Method::GET, "/nnia/appointments", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = app();
    let created = create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/nnia/appointments/{}", id),
        Some(json!({ "status": "confirmed", "time": "11:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], json!("confirmed"));
    assert_eq!(body["appointment"]["time"], json!("11:00"));
    assert_eq!(body["appointment"]["name"], json!("Ana"));
}

#[tokio::test]
async fn update_unknown_appointment_is_400() {
    let app = app();

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/nnia/appointments/{}", AppointmentId::new()),
        Some(json!({ "status": "confirmed" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Appointment not found" }));
}

#[tokio::test]
async fn update_with_malformed_id_is_400() {
    let app = app();

    let (status, _) = send(
        &app.router,
        Method::PUT,
        "/nnia/appointments/not-a-uuid",
        Some(json!({ "status": "confirmed" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_appointment() {
    let app = app();
    let created = create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app.router,
        Method::DELETE,
        &format!("/nnia/appointments/{}", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(app.store.appointments().is_empty());
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn booking_notification_can_be_listed_and_marked_read() {
    let app = app();
    create(&app, booking(app.client_id, "2025-07-01", "09:00")).await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/nnia/notifications?clientId={}", app.client_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["read"], json!(false));
    assert_eq!(notifications[0]["type"], json!("cita"));

    let id = notifications[0]["id"].as_str().unwrap();
    let (status, body) = send(
        &app.router,
        Method::POST,
        &format!("/nnia/notifications/{}/read", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["read"], json!(true));
}

#[tokio::test]
async fn mark_unknown_notification_read_is_400() {
    let app = app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        &format!("/nnia/notifications/{}/read", NotificationId::new()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Notification not found" }));
}

#[tokio::test]
async fn notifications_for_client_without_business_info_are_empty() {
    let app = app();
    let stranger = app.store.seed_client("new@example.com", None);

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/nnia/notifications?clientId={}", stranger),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notifications"], json!([]));
}
