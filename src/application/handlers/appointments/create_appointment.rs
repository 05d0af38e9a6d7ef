//! CreateAppointmentHandler - Books an appointment and notifies the owner.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::foundation::DomainError;
use crate::domain::notification::NewNotification;
use crate::ports::{AppointmentRepository, BusinessInfoRepository, NotificationRepository};

/// Handler for booking appointments.
///
/// The owner notification is best effort: once the appointment is stored the
/// booking succeeds whatever happens to the notification.
pub struct CreateAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    business_info: Arc<dyn BusinessInfoRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl CreateAppointmentHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        business_info: Arc<dyn BusinessInfoRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            appointments,
            business_info,
            notifications,
        }
    }

    pub async fn handle(&self, input: NewAppointment) -> Result<Appointment, DomainError> {
        input.validate()?;

        let appointment = self.appointments.create(input).await?;
        info!(
            appointment_id = %appointment.id,
            client_id = %appointment.client_id,
            status = %appointment.status,
            "Appointment booked"
        );

        self.notify_owner(&appointment).await;
        Ok(appointment)
    }

    async fn notify_owner(&self, appointment: &Appointment) {
        let target = match self.business_info.find_business_info_id(&appointment.client_id).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(client_id = %appointment.client_id, "No business info to notify about appointment");
                return;
            }
            Err(e) => {
                error!(error = %e, client_id = %appointment.client_id, "Failed to look up business info for notification");
                return;
            }
        };

        let notification = NewNotification::appointment_booked(target, appointment);
        if let Err(e) = self.notifications.create(notification).await {
            error!(error = %e, appointment_id = %appointment.id, "Failed to create appointment notification");
        }
    }
}
