//! Appointment domain module.
//!
//! Appointments are booked against a client, either by the owner from the
//! panel or on behalf of a visitor. Dates and times are kept as the text the
//! booking channel supplied (`YYYY-MM-DD`, `HH:MM`), which also sorts
//! chronologically.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AppointmentId, ClientId, ValidationError};

/// Status given to appointments booked without one.
pub const DEFAULT_STATUS: &str = "pending";

/// A booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub date: String,
    pub time: String,
    pub status: String,
    pub origin: Option<String>,
}

/// Input for booking an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub client_id: ClientId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub appointment_type: Option<String>,
    pub date: String,
    pub time: String,
    pub status: Option<String>,
    pub origin: Option<String>,
}

impl NewAppointment {
    /// Checks the fields a booking cannot do without.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date.trim().is_empty() {
            return Err(ValidationError::empty_field("date"));
        }
        if self.time.trim().is_empty() {
            return Err(ValidationError::empty_field("time"));
        }
        Ok(())
    }

    /// Status to persist: the supplied one, or `pending` when absent or blank.
    pub fn resolved_status(&self) -> String {
        match self.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => DEFAULT_STATUS.to_string(),
        }
    }

    /// Materializes the appointment under a freshly generated id.
    pub fn into_appointment(self, id: AppointmentId) -> Appointment {
        let status = self.resolved_status();
        Appointment {
            id,
            client_id: self.client_id,
            name: self.name,
            email: self.email,
            appointment_type: self.appointment_type,
            date: self.date,
            time: self.time,
            status,
            origin: self.origin,
        }
    }
}

/// Partial update; only `Some` fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub appointment_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub origin: Option<String>,
}

impl AppointmentChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the supplied fields to an existing appointment.
    pub fn apply_to(&self, appointment: &mut Appointment) {
        if let Some(name) = &self.name {
            appointment.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            appointment.email = Some(email.clone());
        }
        if let Some(kind) = &self.appointment_type {
            appointment.appointment_type = Some(kind.clone());
        }
        if let Some(date) = &self.date {
            appointment.date = date.clone();
        }
        if let Some(time) = &self.time {
            appointment.time = time.clone();
        }
        if let Some(status) = &self.status {
            appointment.status = status.clone();
        }
        if let Some(origin) = &self.origin {
            appointment.origin = Some(origin.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: Option<&str>) -> NewAppointment {
        NewAppointment {
            client_id: ClientId::new(),
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            appointment_type: Some("call".to_string()),
            date: "2025-07-01".to_string(),
            time: "09:00".to_string(),
            status: status.map(str::to_string),
            origin: Some("web".to_string()),
        }
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(booking(None).resolved_status(), "pending");
        assert_eq!(booking(Some("")).resolved_status(), "pending");
    }

    #[test]
    fn supplied_status_is_kept() {
        assert_eq!(booking(Some("confirmed")).resolved_status(), "confirmed");
    }

    #[test]
    fn validate_requires_date_and_time() {
        let mut input = booking(None);
        input.time = " ".to_string();
        assert!(matches!(
            input.validate(),
            Err(ValidationError::EmptyField { ref field }) if field == "time"
        ));
    }

    #[test]
    fn changes_only_touch_supplied_fields() {
        let mut appointment = booking(None).into_appointment(AppointmentId::new());
        let changes = AppointmentChanges {
            time: Some("10:30".to_string()),
            status: Some("confirmed".to_string()),
            ..Default::default()
        };

        changes.apply_to(&mut appointment);

        assert_eq!(appointment.time, "10:30");
        assert_eq!(appointment.status, "confirmed");
        assert_eq!(appointment.date, "2025-07-01");
        assert_eq!(appointment.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn type_field_serializes_as_type() {
        let appointment = booking(None).into_appointment(AppointmentId::new());
        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["type"], "call");
        assert_eq!(json["status"], "pending");
    }
}
