//! NNIA - Business assistant chat and subscription billing backend.
//!
//! Two services share this crate:
//! - the conversation server (`nnia`) answering visitors and owners through an
//!   OpenAI assistant, plus appointments, availability and notifications
//! - the billing server (`nnia-billing`) driving Stripe checkouts and
//!   subscription changes

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod runtime;
