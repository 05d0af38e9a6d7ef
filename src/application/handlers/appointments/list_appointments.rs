//! ListAppointmentsHandler - Query for a client's appointments.

use std::sync::Arc;

use crate::domain::appointment::Appointment;
use crate::domain::foundation::{ClientId, DomainError};
use crate::ports::AppointmentRepository;

/// Returns appointments ordered by date, then time.
pub struct ListAppointmentsHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl ListAppointmentsHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(&self, client_id: ClientId) -> Result<Vec<Appointment>, DomainError> {
        self.appointments.list_for_client(&client_id).await
    }
}
