//! Conversation handlers.
//!
//! One assistant turn per `/respond` request.

mod respond;

pub use respond::{ConversationError, RespondCommand, RespondHandler, RespondResult};
