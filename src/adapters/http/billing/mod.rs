//! HTTP adapter for the billing server.
//!
//! - `POST /api/create-checkout-session`
//! - `POST /api/cancel-subscription`
//! - `POST /api/update-subscription`
//! - `GET /api/payment-history`
//! - `GET /health`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::{billing_router, billing_routes};
