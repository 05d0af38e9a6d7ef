//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// OpenAI configuration for the assistant gateway
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Assistant id used for threaded runs
    pub assistant_id: Option<String>,

    /// Which gateway strategy answers `/respond`
    #[serde(default)]
    pub mode: AiMode,

    /// Chat completion model (stateless mode)
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Delay between run status polls, in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Upper bound on waiting for a run to settle, in seconds
    #[serde(default = "default_run_timeout")]
    pub run_timeout_secs: u64,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Assistant gateway strategy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    /// Provider-side threads and runs
    #[default]
    Assistant,
    /// One chat completion per turn
    Chat,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    fn has_assistant(&self) -> bool {
        self.assistant_id.as_ref().is_some_and(|id| !id.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("AI__OPENAI_API_KEY"));
        }

        if self.mode == AiMode::Assistant {
            if !self.has_assistant() {
                return Err(ValidationError::MissingRequired("AI__ASSISTANT_ID"));
            }
            if self.poll_interval_ms == 0 || self.poll_interval() >= self.run_timeout() {
                return Err(ValidationError::InvalidPolling);
            }
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            assistant_id: None,
            mode: AiMode::default(),
            model: default_model(),
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval(),
            run_timeout_secs: default_run_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_poll_interval() -> u64 {
    400
}

fn default_run_timeout() -> u64 {
    120
}

fn default_timeout() -> u64 {
    60
}
