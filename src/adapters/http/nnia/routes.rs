//! Axum router for the conversation server.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::health::health;
use super::handlers::{
    analyze_document, create_appointment, delete_appointment, get_availability,
    list_appointments, list_notifications, mark_notification_read, respond, set_availability,
    update_appointment, NniaAppState,
};

/// Routes relative to `/nnia`.
///
/// # Routes
/// - `POST /respond` - One assistant turn
/// - `GET|POST /appointments` - List or book appointments
/// - `PUT|DELETE /appointments/:id` - Edit or remove an appointment
/// - `GET|POST /availability` - Read or overwrite availability
/// - `GET /notifications` - Owner notifications
/// - `POST /notifications/:id/read` - Mark one notification read
/// - `POST /analyze-document` - Document analysis placeholder
pub fn nnia_routes() -> Router<NniaAppState> {
    Router::new()
        .route("/respond", post(respond))
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/:id",
            put(update_appointment).delete(delete_appointment),
        )
        .route("/availability", get(get_availability).post(set_availability))
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", post(mark_notification_read))
        .route("/analyze-document", post(analyze_document))
}

/// The complete conversation server: `/nnia/*` plus `/health`.
pub fn nnia_router(state: NniaAppState) -> Router {
    Router::new()
        .nest("/nnia", nnia_routes())
        .route("/health", get(health))
        .with_state(state)
}
