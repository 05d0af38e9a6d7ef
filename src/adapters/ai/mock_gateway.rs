//! Mock assistant gateway for testing.
//!
//! Returns scripted replies in order and records every request so tests can
//! inspect the assembled prompt and the thread handle that was passed.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockAssistantGateway::new().with_reply("Hello!");
//! let reply = gateway.reply(AssistantRequest::new(prompt)).await?;
//! assert_eq!(reply.text, "Hello!");
//! ```

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::{AIError, AssistantGateway, AssistantReply, AssistantRequest};

/// Thread handle minted when a request carries none.
pub const MOCK_THREAD_ID: &str = "thread_mock";

/// Scripted gateway.
#[derive(Debug, Clone, Default)]
pub struct MockAssistantGateway {
    responses: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<AssistantRequest>>>,
}

/// A configured mock outcome.
#[derive(Debug)]
pub enum MockReply {
    Text(String),
    Error(AIError),
}

impl MockAssistantGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Text(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    fn push(&self, reply: MockReply) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<AssistantRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Most recent request, if any.
    pub fn last_call(&self) -> Option<AssistantRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl AssistantGateway for MockAssistantGateway {
    async fn reply(&self, request: AssistantRequest) -> Result<AssistantReply, AIError> {
        let thread_id = request
            .thread_id
            .clone()
            .unwrap_or_else(|| MOCK_THREAD_ID.to_string());
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(MockReply::Error(error)) => Err(error),
            Some(MockReply::Text(text)) => Ok(AssistantReply {
                thread_id: Some(thread_id),
                messages: vec![json!({
                    "role": "assistant",
                    "content": [{ "type": "text", "text": { "value": text } }]
                })],
                run: Some(json!({ "id": "run_mock", "status": "completed" })),
                text,
            }),
            None => Ok(AssistantReply {
                thread_id: Some(thread_id),
                ..AssistantReply::default()
            }),
        }
    }

    fn strategy(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assistant::PromptMessage;

    #[tokio::test]
    async fn replies_in_order_and_records_calls() {
        let gateway = MockAssistantGateway::new()
            .with_reply("first")
            .with_error(AIError::AuthenticationFailed);

        let reply = gateway
            .reply(AssistantRequest::new(vec![PromptMessage::user("hi")]))
            .await
            .unwrap();
        assert_eq!(reply.text, "first");
        assert_eq!(reply.thread_id.as_deref(), Some(MOCK_THREAD_ID));

        let err = gateway.reply(AssistantRequest::new(vec![])).await.unwrap_err();
        assert!(matches!(err, AIError::AuthenticationFailed));
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn echoes_supplied_thread() {
        let gateway = MockAssistantGateway::new().with_reply("ok");
        let reply = gateway
            .reply(AssistantRequest::new(vec![]).with_thread(Some("thread_42".to_string())))
            .await
            .unwrap();
        assert_eq!(reply.thread_id.as_deref(), Some("thread_42"));
    }

    #[tokio::test]
    async fn exhausted_script_returns_empty_text() {
        let gateway = MockAssistantGateway::new();
        let reply = gateway.reply(AssistantRequest::new(vec![])).await.unwrap();
        assert_eq!(reply.text, "");
    }
}
