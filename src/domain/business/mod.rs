//! Business domain module.
//!
//! Client accounts, their public business profile, and the appointment
//! availability configured for them.

mod availability;
mod client;
mod profile;

pub use availability::{join_list, split_list, Availability, StoredAvailability, DELIMITER};
pub use client::Client;
pub use profile::BusinessProfile;
