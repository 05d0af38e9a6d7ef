//! Assistant Gateway Port - Interface for obtaining assistant replies.
//!
//! Abstracts the AI completion service behind a prompt-in, text-out contract.
//! Two strategies implement it:
//!
//! - **Threaded**: the provider keeps the conversation in a thread; callers
//!   pass the thread handle back on every turn.
//! - **Stateless**: every turn is a single chat completion.
//!
//! Neither strategy keeps conversation state in-process.
//!
//! # Example
//!
//! ```ignore
//! let reply = gateway
//!     .reply(AssistantRequest::new(prompt).with_thread(thread_id))
//!     .await?;
//! println!("{}", reply.text);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::assistant::PromptMessage;

/// Port for assistant reply generation.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Sends the prompt fragments and returns the assistant's reply.
    async fn reply(&self, request: AssistantRequest) -> Result<AssistantReply, AIError>;

    /// Short name of the strategy, for logs.
    fn strategy(&self) -> &'static str;
}

/// One assistant turn.
#[derive(Debug, Clone)]
pub struct AssistantRequest {
    /// Prompt fragments, in order.
    pub messages: Vec<PromptMessage>,
    /// Existing provider thread to continue (threaded strategy only).
    pub thread_id: Option<String>,
    /// Cancelled when the caller stops waiting (e.g. server shutdown).
    pub cancellation: CancellationToken,
}

impl AssistantRequest {
    pub fn new(messages: Vec<PromptMessage>) -> Self {
        Self {
            messages,
            thread_id: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Continues an existing thread. Blank handles are ignored.
    pub fn with_thread(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

/// The assistant's answer.
#[derive(Debug, Clone, Default)]
pub struct AssistantReply {
    /// Thread the turn ran on (threaded strategy only).
    pub thread_id: Option<String>,
    /// Reply text; empty if the provider returned none.
    pub text: String,
    /// Provider messages (thread messages or completion choices), verbatim.
    pub messages: Vec<Value>,
    /// Final run object (threaded strategy only), verbatim.
    pub run: Option<Value>,
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The run did not settle in time.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The caller stopped waiting.
    #[error("request cancelled")]
    Cancelled,
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
