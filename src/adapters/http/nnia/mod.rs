//! HTTP adapter for the conversation server.
//!
//! - `POST /nnia/respond` - Answer a visitor or owner message
//! - `/nnia/appointments` - Appointment CRUD
//! - `/nnia/availability` - Bookable days, hours and types
//! - `/nnia/notifications` - Owner notifications
//! - `POST /nnia/analyze-document` - Placeholder summary
//! - `GET /health`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{NniaAppState, DOCUMENT_SUMMARY_PLACEHOLDER};
pub use routes::{nnia_router, nnia_routes};
