//! RespondHandler - Answers one visitor or owner message.
//!
//! Loads the business context, assembles the prompt, asks the configured
//! assistant gateway and surfaces any booking directive found in the reply.
//! The booking is reported back, not persisted.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::assistant::{build_prompt, BookingRequest, Channel};
use crate::domain::foundation::{ClientId, DomainError};
use crate::ports::{AIError, AssistantGateway, AssistantRequest, BusinessInfoRepository};

/// Command to answer a message.
#[derive(Debug, Clone)]
pub struct RespondCommand {
    pub client_id: ClientId,
    pub message: String,
    pub channel: Channel,
    pub visitor_id: Option<String>,
    pub thread_id: Option<String>,
}

/// Result of a successful turn.
#[derive(Debug, Clone)]
pub struct RespondResult {
    pub reply: String,
    pub thread_id: Option<String>,
    pub messages: Vec<Value>,
    pub run: Option<Value>,
    pub booking: Option<BookingRequest>,
}

/// Errors from a conversation turn.
#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("{0}")]
    Store(#[from] DomainError),

    #[error("{0}")]
    Provider(#[from] AIError),
}

/// Handler for `/respond`.
pub struct RespondHandler {
    business_info: Arc<dyn BusinessInfoRepository>,
    gateway: Arc<dyn AssistantGateway>,
    shutdown: CancellationToken,
}

impl RespondHandler {
    pub fn new(
        business_info: Arc<dyn BusinessInfoRepository>,
        gateway: Arc<dyn AssistantGateway>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            business_info,
            gateway,
            shutdown,
        }
    }

    pub async fn handle(&self, cmd: RespondCommand) -> Result<RespondResult, ConversationError> {
        let profile = self.business_info.get_public_profile(&cmd.client_id).await?;
        let availability = self.business_info.get_availability(&cmd.client_id).await?;

        let prompt = build_prompt(
            &profile,
            &cmd.message,
            &cmd.channel,
            Some(&availability).filter(|a| !a.is_empty()),
        );

        debug!(
            client_id = %cmd.client_id,
            channel = %cmd.channel,
            visitor_id = cmd.visitor_id.as_deref().unwrap_or("-"),
            strategy = self.gateway.strategy(),
            continuing = cmd.thread_id.is_some(),
            "Requesting assistant reply"
        );

        let request = AssistantRequest::new(prompt)
            .with_thread(cmd.thread_id)
            .with_cancellation(self.shutdown.child_token());
        let reply = self.gateway.reply(request).await?;

        let booking = BookingRequest::detect(&reply.text);
        if booking.is_some() {
            info!(client_id = %cmd.client_id, "Assistant reply carries a booking request");
        }

        Ok(RespondResult {
            reply: reply.text,
            thread_id: reply.thread_id,
            messages: reply.messages,
            run: reply.run,
            booking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAssistantGateway;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::business::{Availability, BusinessProfile};
    use crate::domain::foundation::ErrorCode;

    fn seeded() -> (Arc<InMemoryStore>, ClientId) {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", Some("Pan y Sal"));
        store.seed_business_info(
            client_id,
            BusinessProfile {
                business_hours: Some("8-20".to_string()),
                ..Default::default()
            },
        );
        (store, client_id)
    }

    fn command(client_id: ClientId, thread_id: Option<&str>) -> RespondCommand {
        RespondCommand {
            client_id,
            message: "When do you open?".to_string(),
            channel: Channel::parse("web"),
            visitor_id: None,
            thread_id: thread_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn returns_reply_and_echoes_thread() {
        let (store, client_id) = seeded();
        let gateway = Arc::new(MockAssistantGateway::new().with_reply("We open at 8."));
        let handler = RespondHandler::new(store, gateway.clone(), CancellationToken::new());

        let result = handler.handle(command(client_id, Some("thread_7"))).await.unwrap();

        assert_eq!(result.reply, "We open at 8.");
        assert_eq!(result.thread_id.as_deref(), Some("thread_7"));
        assert!(result.booking.is_none());
        assert_eq!(gateway.last_call().unwrap().thread_id.as_deref(), Some("thread_7"));
    }

    #[tokio::test]
    async fn prompt_omits_availability_when_unconfigured() {
        let (store, client_id) = seeded();
        let gateway = Arc::new(MockAssistantGateway::new().with_reply("ok"));
        let handler = RespondHandler::new(store, gateway.clone(), CancellationToken::new());

        handler.handle(command(client_id, None)).await.unwrap();

        let prompt = &gateway.last_call().unwrap().messages[0].content;
        assert!(prompt.contains("Pan y Sal"));
        assert!(!prompt.contains("Appointment availability"));
    }

    #[tokio::test]
    async fn prompt_includes_configured_availability() {
        let (store, client_id) = seeded();
        crate::ports::BusinessInfoRepository::set_availability(
            store.as_ref(),
            &client_id,
            &Availability::new(vec!["mon".into()], "9-5", vec!["call".into()]),
        )
        .await
        .unwrap();
        let gateway = Arc::new(MockAssistantGateway::new().with_reply("ok"));
        let handler = RespondHandler::new(store, gateway.clone(), CancellationToken::new());

        handler.handle(command(client_id, None)).await.unwrap();

        let prompt = &gateway.last_call().unwrap().messages[0].content;
        assert!(prompt.contains("Appointment availability"));
        assert!(prompt.contains("[[CREATE_APPOINTMENT]]"));
    }

    #[tokio::test]
    async fn surfaces_booking_request() {
        let (store, client_id) = seeded();
        let gateway = Arc::new(MockAssistantGateway::new().with_reply(
            r#"Booked! [[CREATE_APPOINTMENT]] {"name":"Ana","date":"2025-07-01","time":"09:00"}"#,
        ));
        let handler = RespondHandler::new(store.clone(), gateway, CancellationToken::new());

        let result = handler.handle(command(client_id, None)).await.unwrap();

        let booking = result.booking.unwrap();
        assert_eq!(booking.name.as_deref(), Some("Ana"));
        assert!(store.appointments().is_empty());
    }

    #[tokio::test]
    async fn unknown_client_is_store_error() {
        let store = Arc::new(InMemoryStore::new());
        let gateway = Arc::new(MockAssistantGateway::new());
        let handler = RespondHandler::new(store, gateway.clone(), CancellationToken::new());

        let err = handler.handle(command(ClientId::new(), None)).await.unwrap_err();

        assert!(matches!(err, ConversationError::Store(ref e) if e.code == ErrorCode::ClientNotFound));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn gateway_failure_is_provider_error() {
        let (store, client_id) = seeded();
        let gateway = Arc::new(MockAssistantGateway::new().with_error(AIError::AuthenticationFailed));
        let handler = RespondHandler::new(store, gateway, CancellationToken::new());

        let err = handler.handle(command(client_id, None)).await.unwrap_err();
        assert!(matches!(err, ConversationError::Provider(AIError::AuthenticationFailed)));
    }
}
