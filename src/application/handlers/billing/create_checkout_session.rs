//! CreateCheckoutSessionHandler - Starts a hosted Stripe checkout.
//!
//! Provisions the Stripe customer on first purchase and records it on the
//! client so later checkouts reuse it.

use std::sync::Arc;

use tracing::{info, warn};

use super::BillingError;
use crate::domain::billing::{CheckoutMode, CHECKOUT_SESSION_PLACEHOLDER};
use crate::domain::business::Client;
use crate::domain::foundation::ClientId;
use crate::ports::{
    CheckoutSession, ClientRepository, CreateCheckoutRequest, CreateCustomerRequest,
    PaymentProvider,
};

/// Command to start a checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub client_id: ClientId,
    pub price_id: String,
    pub mode: CheckoutMode,
    /// Frontend origin the customer returns to.
    pub return_origin: String,
}

pub struct CreateCheckoutSessionHandler {
    clients: Arc<dyn ClientRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            clients,
            payment_provider,
        }
    }

    /// # Errors
    ///
    /// - `ClientNotFound` before any Stripe call if the client is unknown
    /// - `Payment` if Stripe rejects customer or session creation
    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CheckoutSession, BillingError> {
        let client = self
            .clients
            .find_client(&cmd.client_id)
            .await?
            .ok_or(BillingError::ClientNotFound)?;

        let customer_id = self.ensure_customer(&client).await?;
        let origin = cmd.return_origin.trim_end_matches('/');

        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                customer_id,
                client_id: cmd.client_id,
                price_id: cmd.price_id,
                mode: cmd.mode,
                success_url: success_url(origin),
                cancel_url: cancel_url(origin),
            })
            .await?;

        info!(client_id = %cmd.client_id, session_id = %session.id, mode = %cmd.mode, "Checkout session created");
        Ok(session)
    }

    async fn ensure_customer(&self, client: &Client) -> Result<String, BillingError> {
        if let Some(existing) = client.customer_id() {
            return Ok(existing.to_string());
        }

        let customer = self
            .payment_provider
            .create_customer(CreateCustomerRequest::for_client(client.id, client.email.clone()))
            .await?;

        match self.clients.assign_stripe_customer_id(&client.id, &customer.id).await {
            Ok(true) => {}
            Ok(false) => warn!(client_id = %client.id, "Client already had a Stripe customer"),
            Err(e) => warn!(error = %e, client_id = %client.id, "Failed to record Stripe customer"),
        }

        Ok(customer.id)
    }
}

fn success_url(origin: &str) -> String {
    format!(
        "{}/subscription?success=true&session_id={}",
        origin, CHECKOUT_SESSION_PLACEHOLDER
    )
}

fn cancel_url(origin: &str) -> String {
    format!("{}/subscription?canceled=true", origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::ports::PaymentError;

    fn command(client_id: ClientId) -> CreateCheckoutSessionCommand {
        CreateCheckoutSessionCommand {
            client_id,
            price_id: "price_1RdfO7P1x2coidHcPT71SJlt".to_string(),
            mode: CheckoutMode::Subscription,
            return_origin: "https://app.example.com/".to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_client_never_reaches_stripe() {
        let store = Arc::new(InMemoryStore::new());
        let stripe = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(store, stripe.clone());

        let err = handler.handle(command(ClientId::new())).await.unwrap_err();

        assert!(matches!(err, BillingError::ClientNotFound));
        assert!(stripe.untouched());
    }

    #[tokio::test]
    async fn provisions_customer_once() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", None);
        let stripe = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(store.clone(), stripe.clone());

        handler.handle(command(client_id)).await.unwrap();
        handler.handle(command(client_id)).await.unwrap();

        assert_eq!(stripe.call_count("create_customer"), 1);
        assert_eq!(stripe.call_count("create_checkout_session"), 2);
        assert_eq!(
            store.client(&client_id).unwrap().stripe_customer_id.as_deref(),
            Some("cus_mock_1")
        );
    }

    #[tokio::test]
    async fn return_urls_use_origin() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", None);
        let stripe = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(store, stripe.clone());

        handler.handle(command(client_id)).await.unwrap();

        let call = stripe
            .calls()
            .into_iter()
            .find(|c| c.method == "create_checkout_session")
            .unwrap();
        assert_eq!(
            call.args[3],
            "https://app.example.com/subscription?success=true&session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(call.args[4], "https://app.example.com/subscription?canceled=true");
    }

    #[tokio::test]
    async fn stripe_failure_is_payment_error() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", None);
        let stripe = Arc::new(MockPaymentProvider::new());
        stripe.set_method_error("create_checkout_session", PaymentError::network("timeout"));
        let handler = CreateCheckoutSessionHandler::new(store, stripe);

        let err = handler.handle(command(client_id)).await.unwrap_err();
        assert!(matches!(err, BillingError::Payment(_)));
    }
}
