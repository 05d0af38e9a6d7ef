//! Assistant gateway adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIAssistantGateway` - threads/runs against a configured assistant
//! - `OpenAIChatGateway` - one chat completion per turn
//! - `MockAssistantGateway` - scripted replies for tests

mod assistant_gateway;
mod chat_gateway;
mod mock_gateway;
mod openai_client;

use std::sync::Arc;

pub use assistant_gateway::OpenAIAssistantGateway;
pub use chat_gateway::OpenAIChatGateway;
pub use mock_gateway::{MockAssistantGateway, MockReply, MOCK_THREAD_ID};
pub use openai_client::OpenAIConfig;

use crate::config::{AiConfig, AiMode};
use crate::ports::{AIError, AssistantGateway};

/// Builds the gateway selected by `ai.mode`.
pub fn gateway_from_config(config: &AiConfig) -> Result<Arc<dyn AssistantGateway>, AIError> {
    let api_key = config
        .openai_api_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or(AIError::AuthenticationFailed)?;

    let openai = OpenAIConfig::new(api_key)
        .with_model(config.model.clone())
        .with_base_url(config.base_url.clone())
        .with_timeout(config.timeout())
        .with_polling(config.poll_interval(), config.run_timeout());

    Ok(match config.mode {
        AiMode::Assistant => {
            let assistant_id = config.assistant_id.clone().unwrap_or_default();
            Arc::new(OpenAIAssistantGateway::new(openai.with_assistant_id(assistant_id))?)
        }
        AiMode::Chat => Arc::new(OpenAIChatGateway::new(openai)?),
    })
}
