//! UpdateSubscriptionHandler - Moves a subscription to another plan.

use std::sync::Arc;

use tracing::info;

use super::BillingError;
use crate::domain::billing::plan_for_price;
use crate::ports::{PaymentProvider, PlanChange, Subscription, SubscriptionRepository};

/// Command to change plan.
#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub subscription_id: String,
    pub new_price_id: String,
}

pub struct UpdateSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl UpdateSubscriptionHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            subscriptions,
            payment_provider,
        }
    }

    /// Swaps the price of the first subscription item with prorations, then
    /// records the new plan, its full token allotment and the billing period.
    ///
    /// # Errors
    ///
    /// - `UnknownPrice` before any Stripe call if the price is not a plan
    /// - `SubscriptionHasNoItems` if Stripe reports no items
    pub async fn handle(&self, cmd: UpdateSubscriptionCommand) -> Result<Subscription, BillingError> {
        let plan = plan_for_price(&cmd.new_price_id)
            .ok_or_else(|| BillingError::UnknownPrice(cmd.new_price_id.clone()))?;

        let current = self
            .payment_provider
            .get_subscription(&cmd.subscription_id)
            .await?;
        let item = current
            .first_item()
            .ok_or_else(|| BillingError::SubscriptionHasNoItems(cmd.subscription_id.clone()))?;

        let updated = self
            .payment_provider
            .change_subscription_price(&cmd.subscription_id, &item.id, &cmd.new_price_id)
            .await?;

        let change = PlanChange {
            plan: plan.name.to_string(),
            tokens_remaining: plan.tokens,
            current_period_start: updated.period_start(),
            current_period_end: updated.period_end(),
        };
        self.subscriptions
            .apply_plan_change(&cmd.subscription_id, &change)
            .await?;

        info!(subscription_id = %cmd.subscription_id, plan = plan.name, "Subscription plan changed");
        Ok(updated)
    }
}
