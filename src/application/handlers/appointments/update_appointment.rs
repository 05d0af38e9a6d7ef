//! UpdateAppointmentHandler - Partial update of a booked appointment.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentChanges};
use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode};
use crate::ports::AppointmentRepository;

pub struct UpdateAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl UpdateAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// # Errors
    ///
    /// - `ValidationFailed` if no field is supplied
    /// - `AppointmentNotFound` if the id is unknown
    pub async fn handle(
        &self,
        id: AppointmentId,
        changes: AppointmentChanges,
    ) -> Result<Appointment, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("body", "No fields to update"));
        }

        self.appointments
            .update(&id, &changes)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
                    .with_detail("appointment_id", id.to_string())
            })
    }
}
