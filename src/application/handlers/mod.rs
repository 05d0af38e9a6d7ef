//! Command and query handlers, one module per slice.
//!
//! - `conversation` - assistant turns
//! - `appointments` - booking CRUD with owner notification
//! - `availability` - bookable days, hours and types
//! - `notifications` - owner notification inbox
//! - `billing` - checkout, subscription changes, payment history

pub mod appointments;
pub mod availability;
pub mod billing;
pub mod conversation;
pub mod notifications;
