//! PostgreSQL implementation of SubscriptionRepository.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PlanChange, SubscriptionRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn mark_canceled(
        &self,
        stripe_subscription_id: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                status = 'canceled',
                current_period_end = COALESCE($2, current_period_end)
            WHERE stripe_subscription_id = $1
            "#,
        )
        .bind(stripe_subscription_id)
        .bind(current_period_end)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to mark subscription canceled", e))?;

        if result.rows_affected() == 0 {
            warn!(subscription_id = %stripe_subscription_id, "No subscription row to cancel");
        }
        Ok(())
    }

    async fn apply_plan_change(
        &self,
        stripe_subscription_id: &str,
        change: &PlanChange,
    ) -> Result<(), DomainError> {
        let tokens = i64::try_from(change.tokens_remaining).map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "Token allotment out of range")
        })?;

        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                plan = $2,
                tokens_remaining = $3,
                current_period_start = COALESCE($4, current_period_start),
                current_period_end = COALESCE($5, current_period_end)
            WHERE stripe_subscription_id = $1
            "#,
        )
        .bind(stripe_subscription_id)
        .bind(&change.plan)
        .bind(tokens)
        .bind(change.current_period_start)
        .bind(change.current_period_end)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to apply plan change", e))?;

        if result.rows_affected() == 0 {
            warn!(subscription_id = %stripe_subscription_id, "No subscription row to update");
        }
        Ok(())
    }
}
