//! Stripe API objects as they arrive in REST responses.
//!
//! Only the fields the billing endpoints read are modelled; everything else
//! in the payload is ignored. Each type converts into its port counterpart.

use serde::Deserialize;
use std::collections::HashMap;

use crate::ports::{
    CheckoutSession, Customer, PaymentIntent, Subscription, SubscriptionItem, SubscriptionStatus,
};

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    pub email: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl From<StripeCustomer> for Customer {
    fn from(customer: StripeCustomer) -> Self {
        Customer {
            id: customer.id,
            email: customer.email,
        }
    }
}

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted page the customer is redirected to.
    pub url: Option<String>,
}

impl From<StripeCheckoutSession> for CheckoutSession {
    fn from(session: StripeCheckoutSession) -> Self {
        CheckoutSession {
            id: session.id,
            url: session.url,
        }
    }
}

/// Stripe Subscription object.
///
/// Newer API versions report the billing period on the items instead of the
/// subscription; both places are read.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Customer ID owning this subscription.
    pub customer: String,

    pub status: SubscriptionStatus,

    pub current_period_start: Option<i64>,

    pub current_period_end: Option<i64>,

    #[serde(default)]
    pub cancel_at_period_end: bool,

    pub canceled_at: Option<i64>,

    #[serde(default)]
    pub items: StripeList<StripeSubscriptionItem>,
}

/// Single subscription item.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionItem {
    pub id: String,

    pub price: Option<StripePrice>,

    pub current_period_start: Option<i64>,

    pub current_period_end: Option<i64>,
}

/// Price object embedded in subscription items.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    /// Price ID (price_...).
    pub id: String,
}

impl From<StripeSubscription> for Subscription {
    fn from(sub: StripeSubscription) -> Self {
        let first = sub.items.data.first();
        let current_period_start = sub
            .current_period_start
            .or_else(|| first.and_then(|item| item.current_period_start));
        let current_period_end = sub
            .current_period_end
            .or_else(|| first.and_then(|item| item.current_period_end));

        Subscription {
            id: sub.id,
            customer_id: sub.customer,
            status: sub.status,
            current_period_start,
            current_period_end,
            cancel_at_period_end: sub.cancel_at_period_end,
            canceled_at: sub.canceled_at,
            items: sub
                .items
                .data
                .into_iter()
                .map(|item| SubscriptionItem {
                    id: item.id,
                    price_id: item.price.map(|p| p.id),
                })
                .collect(),
        }
    }
}

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created: i64,
    pub description: Option<String>,
}

impl From<StripePaymentIntent> for PaymentIntent {
    fn from(intent: StripePaymentIntent) -> Self {
        PaymentIntent {
            id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
            created: intent.created,
            description: intent.description,
        }
    }
}

/// Paginated list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default)]
    pub has_more: bool,
}

impl<T> Default for StripeList<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            has_more: false,
        }
    }
}

/// Error envelope (`{"error": {...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error category (`card_error`, `invalid_request_error`, ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub code: Option<String>,

    pub message: Option<String>,
}
