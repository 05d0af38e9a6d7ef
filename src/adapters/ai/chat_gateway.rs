//! Stateless assistant gateway over chat completions.
//!
//! Each turn is one `/chat/completions` request; nothing is remembered
//! between turns. No retries: errors go straight back to the caller.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::openai_client::{OpenAIConfig, OpenAIHttp};
use crate::domain::assistant::PromptMessage;
use crate::ports::{AIError, AssistantGateway, AssistantReply, AssistantRequest};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

/// Chat-completion gateway.
pub struct OpenAIChatGateway {
    http: OpenAIHttp,
}

impl OpenAIChatGateway {
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        Ok(Self {
            http: OpenAIHttp::new(config)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn to_chat_request<'a>(model: &'a str, messages: &'a [PromptMessage]) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: messages
            .iter()
            .map(|m| ChatMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect(),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Splits a completion into (first choice text, raw choices).
fn read_completion(completion: Value) -> Result<(String, Vec<Value>), AIError> {
    let choices = match completion.get("choices") {
        Some(Value::Array(choices)) => choices.clone(),
        _ => return Err(AIError::parse("No choices in response")),
    };
    let text = choices
        .first()
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok((text, choices))
}

#[async_trait]
impl AssistantGateway for OpenAIChatGateway {
    async fn reply(&self, request: AssistantRequest) -> Result<AssistantReply, AIError> {
        let body = to_chat_request(&self.http.config.model, &request.messages);
        debug!(model = %body.model, messages = body.messages.len(), "Requesting chat completion");

        let completion: Value = tokio::select! {
            _ = request.cancellation.cancelled() => return Err(AIError::Cancelled),
            result = self.http.post_json("/chat/completions", &body, false) => result?,
        };

        let (text, choices) = read_completion(completion)?;
        Ok(AssistantReply {
            thread_id: None,
            text,
            messages: choices,
            run: None,
        })
    }

    fn strategy(&self) -> &'static str {
        "chat"
    }
}
