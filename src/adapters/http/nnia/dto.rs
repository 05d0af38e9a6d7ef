//! HTTP DTOs for the `/nnia` endpoints.
//!
//! Request fields are optional at the serde level so missing values can be
//! reported with the same `{error}` body as every other failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::conversation::{RespondCommand, RespondResult};
use crate::domain::appointment::{Appointment, AppointmentChanges, NewAppointment};
use crate::domain::assistant::{BookingRequest, Channel};
use crate::domain::business::{split_list, Availability};
use crate::domain::foundation::ClientId;
use crate::domain::notification::Notification;

use super::super::error::{ApiError, MISSING_PARAMETERS};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /nnia/respond`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub client_id: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub visitor_id: Option<String>,
    pub thread_id: Option<String>,
}

impl RespondRequest {
    /// Requires `clientId`, `message` and `source` to be present and non-blank.
    pub fn into_command(self) -> Result<RespondCommand, ApiError> {
        let (Some(client_id), Some(message), Some(source)) = (
            non_blank(self.client_id),
            non_blank(self.message),
            non_blank(self.source),
        ) else {
            return Err(ApiError::bad_request(MISSING_PARAMETERS));
        };

        Ok(RespondCommand {
            client_id: ClientId::parse(&client_id)?,
            message,
            channel: Channel::parse(&source),
            visitor_id: non_blank(self.visitor_id),
            thread_id: non_blank(self.thread_id),
        })
    }
}

/// `?clientId=` on list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    pub client_id: Option<String>,
}

impl ClientQuery {
    pub fn client_id(&self) -> Result<ClientId, ApiError> {
        required_client_id(self.client_id.as_deref())
    }
}

/// `POST /nnia/appointments`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub origin: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn into_new_appointment(self) -> Result<NewAppointment, ApiError> {
        Ok(NewAppointment {
            client_id: required_client_id(self.client_id.as_deref())?,
            name: self.name,
            email: self.email,
            appointment_type: self.appointment_type,
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            status: self.status,
            origin: self.origin,
        })
    }
}

/// `PUT /nnia/appointments/:id`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub origin: Option<String>,
}

impl From<UpdateAppointmentRequest> for AppointmentChanges {
    fn from(req: UpdateAppointmentRequest) -> Self {
        AppointmentChanges {
            name: req.name,
            email: req.email,
            appointment_type: req.appointment_type,
            date: req.date,
            time: req.time,
            status: req.status,
            origin: req.origin,
        }
    }
}

/// A list given either as a JSON array or as delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListOrText {
    List(Vec<String>),
    Text(String),
}

impl ListOrText {
    fn into_list(self) -> Vec<String> {
        match self {
            ListOrText::List(items) => items,
            ListOrText::Text(text) => split_list(&text),
        }
    }
}

/// `POST /nnia/availability`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityRequest {
    pub client_id: Option<String>,
    pub days: Option<ListOrText>,
    pub hours: Option<String>,
    pub types: Option<ListOrText>,
}

impl SetAvailabilityRequest {
    pub fn into_parts(self) -> Result<(ClientId, Availability), ApiError> {
        let client_id = required_client_id(self.client_id.as_deref())?;
        let availability = Availability::new(
            self.days.map(ListOrText::into_list).unwrap_or_default(),
            self.hours.unwrap_or_default(),
            self.types.map(ListOrText::into_list).unwrap_or_default(),
        );
        Ok((client_id, availability))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_client_id(raw: Option<&str>) -> Result<ClientId, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(ClientId::parse(raw)?),
        None => Err(ApiError::bad_request("clientId is required")),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Reply of `/respond`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondResponse {
    pub success: bool,
    pub nnia: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub all_messages: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_request: Option<BookingRequest>,
}

impl From<RespondResult> for RespondResponse {
    fn from(result: RespondResult) -> Self {
        Self {
            success: true,
            nnia: result.reply,
            thread_id: result.thread_id,
            all_messages: result.messages,
            run: result.run,
            booking_request: result.booking,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub success: bool,
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub availability: Availability,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsResponse {
    pub success: bool,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub notification: Notification,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummaryResponse {
    pub success: bool,
    pub summary: String,
}
