//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `business` - Client accounts, public business profile, availability
//! - `appointment` - Booked appointments
//! - `notification` - Owner notifications
//! - `billing` - Plan catalog and checkout modes
//! - `assistant` - Channel personas, prompt assembly, booking directives

pub mod appointment;
pub mod assistant;
pub mod billing;
pub mod business;
pub mod foundation;
pub mod notification;
