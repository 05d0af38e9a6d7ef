//! DeleteAppointmentHandler - Removes an appointment.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AppointmentId, DomainError};
use crate::ports::AppointmentRepository;

pub struct DeleteAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl DeleteAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// Deleting an unknown id succeeds.
    pub async fn handle(&self, id: AppointmentId) -> Result<(), DomainError> {
        self.appointments.delete(&id).await?;
        info!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }
}
