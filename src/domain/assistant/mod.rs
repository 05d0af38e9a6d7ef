//! Assistant domain module.
//!
//! Pure pieces of a conversation turn: channel personas, prompt assembly,
//! and parsing of booking directives out of model replies.

mod booking;
mod channel;
mod prompt;

pub use booking::{BookingRequest, BOOKING_SENTINEL};
pub use channel::{Channel, CLIENT_PANEL};
pub use prompt::{build_prompt, MessageRole, PromptMessage};
