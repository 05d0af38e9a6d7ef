//! Integration tests for `/nnia/respond` and the other conversation-server
//! endpoints that do not touch appointments.
//!
//! The router runs against the in-memory store and a scripted assistant.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use nnia::adapters::ai::MockAssistantGateway;
use nnia::adapters::http::nnia::{nnia_router, NniaAppState, DOCUMENT_SUMMARY_PLACEHOLDER};
use nnia::adapters::memory::InMemoryStore;
use nnia::domain::assistant::MessageRole;
use nnia::domain::business::BusinessProfile;
use nnia::domain::foundation::ClientId;
use nnia::ports::AIError;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    gateway: MockAssistantGateway,
    client_id: ClientId,
}

fn app_with(gateway: MockAssistantGateway) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let client_id = store.seed_client("owner@example.com", Some("Pan y Sal"));
    store.seed_business_info(
        client_id,
        BusinessProfile {
            business_description: Some("Artisan bakery".to_string()),
            ..Default::default()
        },
    );

    let state = NniaAppState {
        business_info: store.clone(),
        appointments: store.clone(),
        notifications: store.clone(),
        gateway: Arc::new(gateway.clone()),
        shutdown: CancellationToken::new(),
    };

    TestApp {
        router: nnia_router(state),
        store,
        gateway,
        client_id,
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
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// /nnia/respond
// =============================================================================

#[tokio::test]
async fn respond_returns_reply_and_echoes_thread() {
    let app = app_with(MockAssistantGateway::new().with_reply("We open at 9."));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/nnia/respond",
        Some(json!({
            "clientId": app.client_id.to_string(),
            "message": "When do you open?",
            "source": "web",
            "threadId": "thread_abc"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["nnia"], json!("We open at 9."));
    assert_eq!(body["threadId"], json!("thread_abc"));
    assert!(body["allMessages"].is_array());
    assert!(body.get("bookingRequest").is_none());

    let call = app.gateway.last_call().unwrap();
    assert_eq!(call.thread_id.as_deref(), Some("thread_abc"));
    assert_eq!(call.messages.len(), 1);
    assert_eq!(call.messages[0].role, MessageRole::User);
    assert!(call.messages[0]
        .content
        .ends_with("User message: When do you open?"));
}

#[tokio::test]
async fn respond_prompt_carries_business_context() {
    let app = app_with(MockAssistantGateway::new().with_reply("Hi"));

    send(
        &app.router,
        Method::POST,
        "/nnia/respond",
        Some(json!({
            "clientId": app.client_id.to_string(),
            "message": "Hello",
            "source": "client-panel"
        })),
    )
    .await;

    let call = app.gateway.last_call().unwrap();
    let prompt: String = call
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(prompt.contains("Artisan bakery"));
    assert!(prompt.contains("Pan y Sal"));
}

#[tokio::test]
async fn respond_surfaces_booking_request() {
    let reply = r#"Booked! [[CREATE_APPOINTMENT]] {"name":"Ana","type":"call","date":"2025-07-01","time":"09:00"}"#;
    let app = app_with(MockAssistantGateway::new().with_reply(reply));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/nnia/respond",
        Some(json!({
            "clientId": app.client_id.to_string(),
            "message": "Book me a call",
            "source": "web"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingRequest"]["name"], json!("Ana"));
    assert_eq!(body["bookingRequest"]["type"], json!("call"));
    // Surfaced only; nothing is booked.
    assert!(app.store.appointments().is_empty());
}

#[tokio::test]
async fn respond_rejects_missing_fields() {
    let app = app_with(MockAssistantGateway::new());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/nnia/respond",
        Some(json!({ "clientId": app.client_id.to_string(), "message": "Hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing required parameters"));
    assert_eq!(app.gateway.call_count(), 0);
}

#[tokio::test]
async fn respond_rejects_malformed_json() {
    let app = app_with(MockAssistantGateway::new());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/nnia/respond")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn respond_provider_failure_is_500_with_details() {
    let app = app_with(MockAssistantGateway::new().with_error(AIError::Timeout { timeout_secs: 120 }));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/nnia/respond",
        Some(json!({
            "clientId": app.client_id.to_string(),
            "message": "Hi",
            "source": "web"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Error processing NNIA request"));
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn respond_for_unknown_client_is_500() {
    let app = app_with(MockAssistantGateway::new().with_reply("unused"));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/nnia/respond",
        Some(json!({
            "clientId": ClientId::new().to_string(),
            "message": "Hi",
            "source": "web"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], json!("[CLIENT_NOT_FOUND] Client not found"));
    assert_eq!(app.gateway.call_count(), 0);
}

// =============================================================================
// Availability
// =============================================================================

#[tokio::test]
async fn availability_without_business_info_is_empty() {
    let app = app_with(MockAssistantGateway::new());
    let stranger = app.store.seed_client("new@example.com", None);

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/nnia/availability?clientId={}", stranger),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["availability"],
        json!({ "days": [], "hours": "", "types": [] })
    );
}

#[tokio::test]
async fn availability_round_trips() {
    let app = app_with(MockAssistantGateway::new());

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/nnia/availability",
        Some(json!({
            "clientId": app.client_id.to_string(),
            "days": ["mon", "tue"],
            "hours": "9-5",
            "types": ["call"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app.router,
        Method::GET,
        &format!("/nnia/availability?clientId={}", app.client_id),
        None,
    )
    .await;

    assert_eq!(
        body["availability"],
        json!({ "days": ["mon", "tue"], "hours": "9-5", "types": ["call"] })
    );
    assert_eq!(
        app.store
            .stored_availability(&app.client_id)
            .unwrap()
            .appointment_days,
        "mon,tue"
    );
}

#[tokio::test]
async fn availability_requires_client_id() {
    let app = app_with(MockAssistantGateway::new());

    let (status, body) = send(&app.router, Method::GET, "/nnia/availability", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn analyze_document_returns_placeholder() {
    let app = app_with(MockAssistantGateway::new());

    let (status, body) = send(&app.router, Method::POST, "/nnia/analyze-document", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "summary": DOCUMENT_SUMMARY_PLACEHOLDER })
    );
}

#[tokio::test]
async fn health_is_ok() {
    let app = app_with(MockAssistantGateway::new());

    let (status, body) = send(&app.router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
