//! HTTP handlers for the `/nnia` endpoints.
//!
//! Each handler builds its application handler from the shared state, runs
//! it, and wraps the result in the `{success, ...}` envelope.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;
use tokio_util::sync::CancellationToken;

use crate::application::handlers::appointments::{
    CreateAppointmentHandler, DeleteAppointmentHandler, ListAppointmentsHandler,
    UpdateAppointmentHandler,
};
use crate::application::handlers::availability::{GetAvailabilityHandler, SetAvailabilityHandler};
use crate::application::handlers::conversation::RespondHandler;
use crate::application::handlers::notifications::{
    ListNotificationsHandler, MarkNotificationReadHandler,
};
use crate::domain::foundation::{AppointmentId, NotificationId};
use crate::ports::{
    AppointmentRepository, AssistantGateway, BusinessInfoRepository, NotificationRepository,
};

use super::super::error::ApiError;
use super::dto::{
    AppointmentResponse, AppointmentsResponse, AvailabilityResponse, ClientQuery,
    CreateAppointmentRequest, DocumentSummaryResponse, NotificationResponse,
    NotificationsResponse, RespondRequest, RespondResponse, SetAvailabilityRequest,
    SuccessResponse, UpdateAppointmentRequest,
};

/// Summary returned until document analysis is backed by a real pipeline.
pub const DOCUMENT_SUMMARY_PLACEHOLDER: &str = "Document summary (analysis not integrated yet)";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the conversation server, cloned per request.
#[derive(Clone)]
pub struct NniaAppState {
    pub business_info: Arc<dyn BusinessInfoRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub gateway: Arc<dyn AssistantGateway>,
    /// Cancelled on shutdown; in-flight assistant runs stop polling.
    pub shutdown: CancellationToken,
}

impl NniaAppState {
    pub fn respond_handler(&self) -> RespondHandler {
        RespondHandler::new(
            self.business_info.clone(),
            self.gateway.clone(),
            self.shutdown.clone(),
        )
    }

    pub fn list_appointments_handler(&self) -> ListAppointmentsHandler {
        ListAppointmentsHandler::new(self.appointments.clone())
    }

    pub fn create_appointment_handler(&self) -> CreateAppointmentHandler {
        CreateAppointmentHandler::new(
            self.appointments.clone(),
            self.business_info.clone(),
            self.notifications.clone(),
        )
    }

    pub fn update_appointment_handler(&self) -> UpdateAppointmentHandler {
        UpdateAppointmentHandler::new(self.appointments.clone())
    }

    pub fn delete_appointment_handler(&self) -> DeleteAppointmentHandler {
        DeleteAppointmentHandler::new(self.appointments.clone())
    }

    pub fn get_availability_handler(&self) -> GetAvailabilityHandler {
        GetAvailabilityHandler::new(self.business_info.clone())
    }

    pub fn set_availability_handler(&self) -> SetAvailabilityHandler {
        SetAvailabilityHandler::new(self.business_info.clone())
    }

    pub fn list_notifications_handler(&self) -> ListNotificationsHandler {
        ListNotificationsHandler::new(self.business_info.clone(), self.notifications.clone())
    }

    pub fn mark_notification_read_handler(&self) -> MarkNotificationReadHandler {
        MarkNotificationReadHandler::new(self.notifications.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversation
// ════════════════════════════════════════════════════════════════════════════════

/// POST /nnia/respond
pub async fn respond(
    State(state): State<NniaAppState>,
    body: Result<Json<RespondRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = request.into_command()?;

    let result = state.respond_handler().handle(cmd).await?;

    Ok(Json(RespondResponse::from(result)))
}

/// POST /nnia/analyze-document
pub async fn analyze_document() -> impl IntoResponse {
    Json(DocumentSummaryResponse {
        success: true,
        summary: DOCUMENT_SUMMARY_PLACEHOLDER.to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Appointments
// ════════════════════════════════════════════════════════════════════════════════

/// GET /nnia/appointments?clientId=
pub async fn list_appointments(
    State(state): State<NniaAppState>,
    Query(query): Query<ClientQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id = query.client_id()?;
    let appointments = state.list_appointments_handler().handle(client_id).await?;

    Ok(Json(AppointmentsResponse {
        success: true,
        appointments,
    }))
}

/// POST /nnia/appointments
pub async fn create_appointment(
    State(state): State<NniaAppState>,
    body: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let input = request.into_new_appointment()?;

    let appointment = state.create_appointment_handler().handle(input).await?;

    Ok(Json(AppointmentResponse {
        success: true,
        appointment,
    }))
}

/// PUT /nnia/appointments/:id
pub async fn update_appointment(
    State(state): State<NniaAppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateAppointmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AppointmentId::parse(&id)?;
    let Json(request) = body?;

    let appointment = state
        .update_appointment_handler()
        .handle(id, request.into())
        .await?;

    Ok(Json(AppointmentResponse {
        success: true,
        appointment,
    }))
}

/// DELETE /nnia/appointments/:id
pub async fn delete_appointment(
    State(state): State<NniaAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AppointmentId::parse(&id)?;
    state.delete_appointment_handler().handle(id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Availability
// ════════════════════════════════════════════════════════════════════════════════

/// GET /nnia/availability?clientId=
pub async fn get_availability(
    State(state): State<NniaAppState>,
    Query(query): Query<ClientQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id = query.client_id()?;
    let availability = state.get_availability_handler().handle(client_id).await?;

    Ok(Json(AvailabilityResponse {
        success: true,
        availability,
    }))
}

/// POST /nnia/availability
pub async fn set_availability(
    State(state): State<NniaAppState>,
    body: Result<Json<SetAvailabilityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let (client_id, availability) = request.into_parts()?;

    let availability = state
        .set_availability_handler()
        .handle(client_id, availability)
        .await?;

    Ok(Json(AvailabilityResponse {
        success: true,
        availability,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Notifications
// ════════════════════════════════════════════════════════════════════════════════

/// GET /nnia/notifications?clientId=
pub async fn list_notifications(
    State(state): State<NniaAppState>,
    Query(query): Query<ClientQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id = query.client_id()?;
    let notifications = state.list_notifications_handler().handle(client_id).await?;

    Ok(Json(NotificationsResponse {
        success: true,
        notifications,
    }))
}

/// POST /nnia/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<NniaAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = NotificationId::parse(&id)?;
    let notification = state.mark_notification_read_handler().handle(id).await?;

    Ok(Json(NotificationResponse {
        success: true,
        notification,
    }))
}
