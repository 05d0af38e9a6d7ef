//! Shared OpenAI HTTP plumbing.
//!
//! Both gateway strategies talk to the same API with the same credentials and
//! the same status-code mapping; this module owns those pieces.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_assistant_id("asst_...")
//!     .with_base_url("https://api.openai.com/v1");
//! ```

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::ports::AIError;

/// Header enabling the threads/runs API.
const ASSISTANTS_BETA: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Configuration for the OpenAI gateways.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Chat completion model.
    pub model: String,
    /// Assistant used for threaded runs.
    pub assistant_id: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Delay between run status polls.
    pub poll_interval: Duration,
    /// Upper bound on waiting for a run.
    pub run_timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o".to_string(),
            assistant_id: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(400),
            run_timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the assistant id.
    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = assistant_id.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets run polling interval and bound.
    pub fn with_polling(mut self, interval: Duration, run_timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.run_timeout = run_timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Authenticated HTTP access to the OpenAI API.
pub(crate) struct OpenAIHttp {
    pub(crate) config: OpenAIConfig,
    client: Client,
}

impl OpenAIHttp {
    pub(crate) fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder, assistants: bool) -> RequestBuilder {
        let builder = builder.bearer_auth(self.config.api_key());
        if assistants {
            builder.header(ASSISTANTS_BETA.0, ASSISTANTS_BETA.1)
        } else {
            builder
        }
    }

    /// POSTs a JSON body and decodes the JSON reply.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B, assistants: bool) -> Result<R, AIError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request = self.authorize(self.client.post(self.url(path)), assistants).json(body);
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        Self::decode(response).await
    }

    /// GETs and decodes the JSON reply.
    pub(crate) async fn get_json<R>(&self, path: &str, assistants: bool) -> Result<R, AIError>
    where
        R: DeserializeOwned,
    {
        let request = self.authorize(self.client.get(self.url(path)), assistants);
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        Self::decode(response).await
    }

    fn map_send_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, AIError> {
        let response = handle_response_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))
    }
}

/// Maps non-success statuses to `AIError`.
async fn handle_response_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();

    Err(match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&error_body)),
        400 | 404 | 422 => AIError::InvalidRequest(error_body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    })
}

/// Parses "try again in Ns" out of a rate-limit error; 30 when absent.
pub(crate) fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let idx = message.find("try again in ")?;
            let digits: String = message[idx + 13..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        })
        .unwrap_or(30)
}
