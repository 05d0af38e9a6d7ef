//! Subscription repository port.
//!
//! Mirrors payment processor subscription changes into the `subscriptions`
//! table, keyed by the processor's subscription id.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// New plan state written after a price change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanChange {
    pub plan: String,
    pub tokens_remaining: u64,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Sets `status = 'canceled'` and records the period end.
    async fn mark_canceled(
        &self,
        stripe_subscription_id: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError>;

    /// Writes plan name, token allotment and billing period.
    async fn apply_plan_change(
        &self,
        stripe_subscription_id: &str,
        change: &PlanChange,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SubscriptionRepository) {}
    }
}
