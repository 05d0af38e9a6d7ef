//! CancelSubscriptionHandler - Schedules cancellation at period end.

use std::sync::Arc;

use tracing::info;

use super::BillingError;
use crate::ports::{PaymentProvider, Subscription, SubscriptionRepository};

pub struct CancelSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CancelSubscriptionHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            subscriptions,
            payment_provider,
        }
    }

    /// The local row is marked `canceled` right away; access continues
    /// until the recorded period end.
    pub async fn handle(&self, subscription_id: &str) -> Result<Subscription, BillingError> {
        let subscription = self
            .payment_provider
            .cancel_subscription_at_period_end(subscription_id)
            .await?;

        self.subscriptions
            .mark_canceled(subscription_id, subscription.period_end())
            .await?;

        info!(subscription_id, period_end = ?subscription.current_period_end, "Subscription canceled at period end");
        Ok(subscription)
    }
}
