//! Conversation channels and the persona each one gets.

use std::fmt;

/// Channel identifier of the owner's own dashboard.
pub const CLIENT_PANEL: &str = "client-panel";

const OWNER_PERSONA: &str = "You are the personal assistant of the business owner. \
Answer professionally and proactively, and you may use the business's internal information.";

const PUBLIC_PERSONA: &str = "You are the sales and customer support assistant of the business. \
You talk to visitors and prospective customers on the website or social media. \
Only use the business's public information.";

/// Where a message came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The owner talking from the client panel.
    ClientPanel,
    /// Any public channel (web widget, social media, ...), kept verbatim.
    Other(String),
}

impl Channel {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source == CLIENT_PANEL {
            Channel::ClientPanel
        } else {
            Channel::Other(source.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Channel::ClientPanel => CLIENT_PANEL,
            Channel::Other(s) => s,
        }
    }

    /// Role instructions for the assistant on this channel.
    pub fn persona(&self) -> &'static str {
        match self {
            Channel::ClientPanel => OWNER_PERSONA,
            Channel::Other(_) => PUBLIC_PERSONA,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
