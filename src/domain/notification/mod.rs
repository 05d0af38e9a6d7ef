//! Owner notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::appointment::Appointment;
use crate::domain::foundation::{BusinessInfoId, NotificationId};

/// Notification kind raised when an appointment is booked.
pub const APPOINTMENT_NOTIFICATION: &str = "cita";

/// A notification shown in the owner panel.
///
/// `client_id` holds the owning `business_info` id, not the client account id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub client_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub client_id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: Value,
}

impl NewNotification {
    pub fn new(
        client_id: Uuid,
        kind: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            client_id,
            kind: kind.into(),
            title: title.into(),
            body: body.into(),
            data: normalize_data(data),
        }
    }

    /// Notification announcing a freshly booked appointment.
    pub fn appointment_booked(target: BusinessInfoId, appointment: &Appointment) -> Self {
        let body = format!(
            "Se ha agendado una cita para {} el {} a las {}.",
            appointment.name.as_deref().unwrap_or_default(),
            appointment.date,
            appointment.time
        );
        Self::new(
            *target.as_uuid(),
            APPOINTMENT_NOTIFICATION,
            "Nueva cita agendada",
            body,
            json!({ "appointmentId": appointment.id }),
        )
    }

    /// Materializes the notification; new notifications start unread.
    pub fn into_notification(self, id: NotificationId, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            client_id: self.client_id,
            kind: self.kind,
            title: self.title,
            body: self.body,
            data: self.data,
            read: false,
            created_at,
        }
    }
}

/// Non-object payloads are replaced with `{}`.
fn normalize_data(data: Value) -> Value {
    if data.is_object() {
        data
    } else {
        Value::Object(Default::default())
    }
}
