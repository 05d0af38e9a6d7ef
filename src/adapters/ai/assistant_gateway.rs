//! Threaded assistant gateway over the OpenAI threads/runs API.
//!
//! A turn appends messages to a provider-side thread, starts a run against
//! the configured assistant, waits for the run to settle, then reads the
//! newest assistant message. The thread handle is returned so the caller can
//! continue the conversation; nothing is kept in-process.
//!
//! The wait is bounded by the configured run timeout and stops early when the
//! request's cancellation token fires.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::openai_client::{OpenAIConfig, OpenAIHttp};
use crate::domain::assistant::{MessageRole, PromptMessage};
use crate::ports::{AIError, AssistantGateway, AssistantReply, AssistantRequest};

/// Run statuses that mean "keep waiting".
const PENDING_STATUSES: [&str; 2] = ["queued", "in_progress"];

/// Threads/runs gateway.
pub struct OpenAIAssistantGateway {
    http: OpenAIHttp,
}

impl OpenAIAssistantGateway {
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        if config.assistant_id.trim().is_empty() {
            return Err(AIError::InvalidRequest("assistant id is not configured".to_string()));
        }
        Ok(Self {
            http: OpenAIHttp::new(config)?,
        })
    }

    async fn create_thread(&self) -> Result<String, AIError> {
        let thread: Value = self.http.post_json("/threads", &json!({}), true).await?;
        object_id(&thread, "thread")
    }

    async fn append_message(&self, thread_id: &str, message: &PromptMessage) -> Result<(), AIError> {
        let body = json!({
            "role": thread_role(message.role),
            "content": message.content,
        });
        let _: Value = self
            .http
            .post_json(&format!("/threads/{}/messages", thread_id), &body, true)
            .await?;
        Ok(())
    }

    async fn start_run(&self, thread_id: &str) -> Result<Value, AIError> {
        let body = json!({ "assistant_id": self.http.config.assistant_id });
        self.http
            .post_json(&format!("/threads/{}/runs", thread_id), &body, true)
            .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Value, AIError> {
        self.http
            .get_json(&format!("/threads/{}/runs/{}", thread_id, run_id), true)
            .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Value>, AIError> {
        let page: Value = self
            .http
            .get_json(&format!("/threads/{}/messages", thread_id), true)
            .await?;
        match page.get("data") {
            Some(Value::Array(data)) => Ok(data.clone()),
            _ => Err(AIError::parse("Thread message list has no data")),
        }
    }
}

#[async_trait]
impl AssistantGateway for OpenAIAssistantGateway {
    async fn reply(&self, request: AssistantRequest) -> Result<AssistantReply, AIError> {
        let (thread_id, is_new) = match request.thread_id {
            Some(existing) => (existing, false),
            None => (self.create_thread().await?, true),
        };

        for message in messages_to_append(&request.messages, is_new) {
            self.append_message(&thread_id, message).await?;
        }

        let run = self.start_run(&thread_id).await?;
        let run_id = object_id(&run, "run")?;
        debug!(thread_id = %thread_id, run_id = %run_id, new_thread = is_new, "Started assistant run");

        let run = wait_for_run(
            run,
            || self.retrieve_run(&thread_id, &run_id),
            self.http.config.poll_interval,
            self.http.config.run_timeout,
            &request.cancellation,
        )
        .await?;

        info!(
            thread_id = %thread_id,
            run_id = %run_id,
            status = run_status(&run).unwrap_or("unknown"),
            "Assistant run settled"
        );

        let messages = self.list_messages(&thread_id).await?;
        let text = latest_assistant_text(&messages);

        Ok(AssistantReply {
            thread_id: Some(thread_id),
            text,
            messages,
            run: Some(run),
        })
    }

    fn strategy(&self) -> &'static str {
        "assistant"
    }
}

/// The threads API accepts only `user` and `assistant` authors.
fn thread_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::Assistant => "assistant",
        MessageRole::System | MessageRole::User => "user",
    }
}

/// A new thread receives every fragment once; an existing thread only the
/// newest user fragment.
fn messages_to_append(messages: &[PromptMessage], new_thread: bool) -> Vec<&PromptMessage> {
    if new_thread {
        messages.iter().collect()
    } else {
        messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .into_iter()
            .collect()
    }
}

fn object_id(object: &Value, kind: &str) -> Result<String, AIError> {
    object
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AIError::parse(format!("{} response has no id", kind)))
}

fn run_status(run: &Value) -> Option<&str> {
    run.get("status").and_then(Value::as_str)
}

fn is_pending(run: &Value) -> bool {
    run_status(run).map_or(false, |s| PENDING_STATUSES.contains(&s))
}

/// Polls until the run leaves `queued`/`in_progress`.
///
/// Sleeps `interval` before each poll. Fails with `Timeout` once `timeout`
/// has elapsed and with `Cancelled` as soon as `cancel` fires.
pub(crate) async fn wait_for_run<F, Fut>(
    initial: Value,
    mut poll: F,
    interval: Duration,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Value, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Value, AIError>>,
{
    let polling = async {
        let mut run = initial;
        while is_pending(&run) {
            tokio::time::sleep(interval).await;
            run = poll().await?;
        }
        Ok::<Value, AIError>(run)
    };

    tokio::select! {
        _ = cancel.cancelled() => Err(AIError::Cancelled),
        result = tokio::time::timeout(timeout, polling) => result.unwrap_or_else(|_| {
            Err(AIError::Timeout {
                timeout_secs: timeout.as_secs(),
            })
        }),
    }
}

/// First text block of the newest assistant message; empty if none.
///
/// Thread messages are listed newest first.
fn latest_assistant_text(messages: &[Value]) -> String {
    messages
        .iter()
        .find(|m| m.get("role").and_then(Value::as_str) == Some("assistant"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_array)
        .and_then(|blocks| {
            blocks
                .iter()
                .find(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        })
        .and_then(|b| b.get("text"))
        .and_then(|t| t.get("value"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
