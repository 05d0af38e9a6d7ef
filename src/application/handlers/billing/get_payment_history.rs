//! GetPaymentHistoryHandler - Recent payments of a client.

use std::sync::Arc;

use super::BillingError;
use crate::domain::foundation::ClientId;
use crate::ports::{ClientRepository, PaymentIntent, PaymentProvider, PAYMENT_HISTORY_LIMIT};

pub struct GetPaymentHistoryHandler {
    clients: Arc<dyn ClientRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl GetPaymentHistoryHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            clients,
            payment_provider,
        }
    }

    /// The most recent payment intents, newest first.
    ///
    /// Clients that are unknown or never reached checkout have no Stripe
    /// customer; their history is empty and Stripe is not called.
    pub async fn handle(&self, client_id: ClientId) -> Result<Vec<PaymentIntent>, BillingError> {
        let client = self.clients.find_client(&client_id).await?;
        let Some(customer_id) = client.as_ref().and_then(|c| c.customer_id()) else {
            return Ok(Vec::new());
        };

        Ok(self
            .payment_provider
            .list_payment_intents(customer_id, PAYMENT_HISTORY_LIMIT)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::business::Client;

    fn intent(id: &str) -> PaymentIntent {
        PaymentIntent {
            id: id.to_string(),
            amount: 4900,
            currency: "usd".to_string(),
            status: "succeeded".to_string(),
            created: 1_704_067_200,
            description: None,
        }
    }

    #[tokio::test]
    async fn client_without_customer_skips_stripe() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", None);
        let stripe = Arc::new(MockPaymentProvider::new());

        let payments = GetPaymentHistoryHandler::new(store, stripe.clone())
            .handle(client_id)
            .await
            .unwrap();

        assert!(payments.is_empty());
        assert!(stripe.untouched());
    }

    #[tokio::test]
    async fn unknown_client_skips_stripe() {
        let store = Arc::new(InMemoryStore::new());
        let stripe = Arc::new(MockPaymentProvider::new());

        let payments = GetPaymentHistoryHandler::new(store, stripe.clone())
            .handle(ClientId::new())
            .await
            .unwrap();

        assert!(payments.is_empty());
        assert!(stripe.untouched());
    }

    #[tokio::test]
    async fn lists_customer_payments() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = ClientId::new();
        store.put_client(Client {
            id: client_id,
            email: None,
            business_name: None,
            stripe_customer_id: Some("cus_9".to_string()),
        });
        let stripe = Arc::new(MockPaymentProvider::new());
        stripe.add_payment_intents("cus_9", vec![intent("pi_2"), intent("pi_1")]);

        let payments = GetPaymentHistoryHandler::new(store, stripe.clone())
            .handle(client_id)
            .await
            .unwrap();

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].id, "pi_2");
        assert_eq!(stripe.calls()[0].args, vec!["cus_9", "10"]);
    }
}
