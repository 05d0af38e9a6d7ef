//! Appointment repository port.

use crate::domain::appointment::{Appointment, AppointmentChanges, NewAppointment};
use crate::domain::foundation::{AppointmentId, ClientId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Appointments of a client, ordered by date then time, ascending.
    async fn list_for_client(&self, client_id: &ClientId) -> Result<Vec<Appointment>, DomainError>;

    /// Persists a new appointment. Status defaults to `pending`.
    async fn create(&self, input: NewAppointment) -> Result<Appointment, DomainError>;

    /// Applies a partial update.
    ///
    /// Returns `None` if no appointment has this id.
    async fn update(
        &self,
        id: &AppointmentId,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, DomainError>;

    /// Deletes an appointment. Deleting a missing id is not an error.
    async fn delete(&self, id: &AppointmentId) -> Result<(), DomainError>;
}
