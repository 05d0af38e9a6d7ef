//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured subscriptions and payment intents
//! - Error injection
//! - Call tracking, so tests can assert Stripe was never reached

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, Customer, PaymentError,
    PaymentIntent, PaymentProvider, Subscription, SubscriptionItem, SubscriptionStatus,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.add_subscription(subscription);
/// mock.set_method_error("create_checkout_session", PaymentError::network("down"));
///
/// // ... drive the handler ...
/// assert!(!mock.was_called("create_customer"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Known subscriptions by ID.
    subscriptions: HashMap<String, Subscription>,

    /// Payment intents by customer ID, newest first.
    payment_intents: HashMap<String, Vec<PaymentIntent>>,

    /// Number of customers created so far (for deterministic ids).
    customers_created: usize,

    /// Number of sessions created so far (for deterministic ids).
    sessions_created: usize,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a subscription to the "account".
    pub fn add_subscription(&self, subscription: Subscription) {
        self.state()
            .subscriptions
            .insert(subscription.id.clone(), subscription);
    }

    /// Add payment intents for a customer, newest first.
    pub fn add_payment_intents(&self, customer_id: &str, intents: Vec<PaymentIntent>) {
        self.state()
            .payment_intents
            .insert(customer_id.to_string(), intents);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// True when no method was called at all.
    pub fn untouched(&self) -> bool {
        self.state().call_log.is_empty()
    }

    /// Current state of a stored subscription.
    pub fn subscription(&self, id: &str) -> Option<Subscription> {
        self.state().subscriptions.get(id).cloned()
    }

    fn record_call(&self, method: &str, args: Vec<String>) -> Result<(), PaymentError> {
        let mut state = self.state();
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
        match state.method_errors.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn stored_subscription(&self, id: &str) -> Result<Subscription, PaymentError> {
        self.state()
            .subscriptions
            .get(id)
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Subscription"))
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        self.record_call(
            "create_customer",
            vec![request.client_id.to_string(), request.email.clone().unwrap_or_default()],
        )?;

        let mut state = self.state();
        state.customers_created += 1;
        Ok(Customer {
            id: format!("cus_mock_{}", state.customers_created),
            email: request.email,
        })
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call(
            "create_checkout_session",
            vec![
                request.customer_id.clone(),
                request.price_id.clone(),
                request.mode.to_string(),
                request.success_url.clone(),
                request.cancel_url.clone(),
            ],
        )?;

        let mut state = self.state();
        state.sessions_created += 1;
        let id = format!("cs_mock_{}", state.sessions_created);
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.stripe.com/c/pay/{}", id)),
            id,
        })
    }

    async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription, PaymentError> {
        self.record_call("get_subscription", vec![subscription_id.to_string()])?;
        self.stored_subscription(subscription_id)
    }

    async fn cancel_subscription_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, PaymentError> {
        self.record_call("cancel_subscription", vec![subscription_id.to_string()])?;

        let mut sub = self.stored_subscription(subscription_id)?;
        sub.cancel_at_period_end = true;
        sub.canceled_at = Some(chrono::Utc::now().timestamp());
        self.add_subscription(sub.clone());
        Ok(sub)
    }

    async fn change_subscription_price(
        &self,
        subscription_id: &str,
        item_id: &str,
        new_price_id: &str,
    ) -> Result<Subscription, PaymentError> {
        self.record_call(
            "update_subscription",
            vec![
                subscription_id.to_string(),
                item_id.to_string(),
                new_price_id.to_string(),
            ],
        )?;

        let mut sub = self.stored_subscription(subscription_id)?;
        let item = sub
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PaymentError::not_found("Subscription item"))?;
        item.price_id = Some(new_price_id.to_string());
        sub.status = SubscriptionStatus::Active;
        self.add_subscription(sub.clone());
        Ok(sub)
    }

    async fn list_payment_intents(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<PaymentIntent>, PaymentError> {
        self.record_call(
            "list_payment_intents",
            vec![customer_id.to_string(), limit.to_string()],
        )?;

        let state = self.state();
        Ok(state
            .payment_intents
            .get(customer_id)
            .map(|intents| intents.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

/// Active single-item subscription for tests.
pub fn sample_subscription(id: &str, customer_id: &str, price_id: &str) -> Subscription {
    Subscription {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        status: SubscriptionStatus::Active,
        current_period_start: Some(1_704_067_200),
        current_period_end: Some(1_706_745_600),
        cancel_at_period_end: false,
        canceled_at: None,
        items: vec![SubscriptionItem {
            id: format!("si_{}", id),
            price_id: Some(price_id.to_string()),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ClientId;
    use crate::ports::PaymentErrorCode;

    #[tokio::test]
    async fn create_customer_records_call() {
        let mock = MockPaymentProvider::new();
        let customer = mock
            .create_customer(CreateCustomerRequest::for_client(ClientId::new(), Some("a@b.c".into())))
            .await
            .unwrap();

        assert_eq!(customer.id, "cus_mock_1");
        assert!(mock.was_called("create_customer"));
        assert_eq!(mock.call_count("create_customer"), 1);
    }

    #[tokio::test]
    async fn method_error_is_returned_and_call_recorded() {
        let mock = MockPaymentProvider::new();
        mock.set_method_error("get_subscription", PaymentError::network("down"));

        let err = mock.get_subscription("sub_1").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::NetworkError);
        assert!(mock.was_called("get_subscription"));
    }

    #[tokio::test]
    async fn unknown_subscription_is_not_found() {
        let mock = MockPaymentProvider::new();
        let err = mock.cancel_subscription_at_period_end("sub_missing").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::NotFound);
    }

    #[tokio::test]
    async fn price_change_updates_item() {
        let mock = MockPaymentProvider::new();
        mock.add_subscription(sample_subscription("sub_1", "cus_1", "price_a"));

        let sub = mock
            .change_subscription_price("sub_1", "si_sub_1", "price_b")
            .await
            .unwrap();
        assert_eq!(sub.first_item().unwrap().price_id.as_deref(), Some("price_b"));
        assert_eq!(
            mock.subscription("sub_1").unwrap().first_item().unwrap().price_id.as_deref(),
            Some("price_b")
        );
    }

    #[tokio::test]
    async fn payment_intents_respect_limit() {
        let mock = MockPaymentProvider::new();
        let intents = (0..12)
            .map(|n| PaymentIntent {
                id: format!("pi_{}", n),
                amount: 1900,
                currency: "usd".to_string(),
                status: "succeeded".to_string(),
                created: 1_704_067_200 - n,
                description: None,
            })
            .collect();
        mock.add_payment_intents("cus_1", intents);

        let listed = mock.list_payment_intents("cus_1", 10).await.unwrap();
        assert_eq!(listed.len(), 10);
        assert_eq!(listed[0].id, "pi_0");
        assert!(mock.list_payment_intents("cus_other", 10).await.unwrap().is_empty());
    }
}
