//! Application layer - Command and query handlers.
//!
//! Handlers orchestrate domain operations through ports and are built per
//! request from the HTTP state.

pub mod handlers;
