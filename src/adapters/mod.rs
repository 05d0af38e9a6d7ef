//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI assistant gateways and a scripted mock
//! - `http` - axum routers for both servers
//! - `memory` - in-memory store for tests and local runs
//! - `postgres` - relational store repositories
//! - `stripe` - Stripe payment provider and a recording mock

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
