//! Appointment handlers.
//!
//! ## Commands
//! - Booking an appointment (with best-effort owner notification)
//! - Updating and deleting appointments
//!
//! ## Queries
//! - Listing a client's appointments

mod create_appointment;
mod delete_appointment;
mod list_appointments;
mod update_appointment;

pub use create_appointment::CreateAppointmentHandler;
pub use delete_appointment::DeleteAppointmentHandler;
pub use list_appointments::ListAppointmentsHandler;
pub use update_appointment::UpdateAppointmentHandler;
