//! Availability handlers.
//!
//! Read and overwrite the bookable days, hours and appointment types of a
//! client's business.

mod get_availability;
mod set_availability;

pub use get_availability::GetAvailabilityHandler;
pub use set_availability::SetAvailabilityHandler;
