//! Prompt assembly for assistant turns.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::booking::BOOKING_SENTINEL;
use super::Channel;
use crate::domain::business::{Availability, BusinessProfile};

/// Role of a prompt fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A role-tagged fragment sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Builds the fragments for one assistant turn.
///
/// Returns a single user fragment carrying the business context as JSON, the
/// channel, the channel persona, the availability and booking instruction
/// (only when `availability` is given), and finally the user's message.
pub fn build_prompt(
    profile: &BusinessProfile,
    message: &str,
    channel: &Channel,
    availability: Option<&Availability>,
) -> Vec<PromptMessage> {
    let mut content = format!(
        "Business information: {}. Channel: {}. {}",
        profile.to_prompt_context(),
        channel,
        channel.persona()
    );

    if let Some(availability) = availability {
        let availability_json = json!({
            "days": availability.days,
            "hours": availability.hours,
            "types": availability.types,
        });
        content.push_str(&format!(
            "\n\nAppointment availability: {}. {}",
            availability_json,
            booking_instruction()
        ));
    }

    content.push_str("\n\nUser message: ");
    content.push_str(message);

    vec![PromptMessage::user(content)]
}

fn booking_instruction() -> String {
    format!(
        "If the visitor wants to book an appointment and you have gathered their name, email, \
appointment type, date and time, reply with {} followed by a JSON object with the keys \
\"name\", \"email\", \"type\", \"date\" (YYYY-MM-DD), \"time\" (HH:MM) and \"origin\". \
Otherwise reply with ordinary text.",
        BOOKING_SENTINEL
    )
}
