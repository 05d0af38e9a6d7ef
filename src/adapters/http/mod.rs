//! HTTP adapters - REST API implementations.
//!
//! One slice per server, sharing error mapping, health and middleware.

pub mod billing;
pub mod error;
pub mod health;
pub mod middleware;
pub mod nnia;

pub use billing::{billing_router, BillingAppState};
pub use error::{ApiError, ErrorResponse};
pub use nnia::{nnia_router, NniaAppState};
