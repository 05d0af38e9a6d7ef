//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! Implementations handle customer provisioning, checkout sessions,
//! subscription changes and payment history.
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Pass-through**: Results mirror the provider's objects closely so the
//!   billing endpoints can return them as-is
//! - **Idempotent customer creation**: keyed by the internal client id

use crate::domain::billing::CheckoutMode;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of payment intents returned by payment history.
pub const PAYMENT_HISTORY_LIMIT: u32 = 10;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a customer in the payment system.
    ///
    /// Returns the provider's customer for future reference.
    async fn create_customer(&self, request: CreateCustomerRequest)
        -> Result<Customer, PaymentError>;

    /// Create a hosted checkout session for a single price.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Get subscription by provider ID.
    async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription, PaymentError>;

    /// Schedule cancellation at the end of the current period.
    async fn cancel_subscription_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, PaymentError>;

    /// Swap the price of one subscription item, creating prorations.
    async fn change_subscription_price(
        &self,
        subscription_id: &str,
        item_id: &str,
        new_price_id: &str,
    ) -> Result<Subscription, PaymentError>;

    /// Most recent payment intents of a customer, newest first.
    async fn list_payment_intents(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<PaymentIntent>, PaymentError>;
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    /// Internal client ID (stored as metadata).
    pub client_id: ClientId,

    /// Customer email address.
    pub email: Option<String>,

    /// Idempotency key for safe retries.
    pub idempotency_key: Option<String>,
}

impl CreateCustomerRequest {
    /// Customer request keyed by the client id.
    pub fn for_client(client_id: ClientId, email: Option<String>) -> Self {
        Self {
            client_id,
            email,
            idempotency_key: Some(format!("customer-{}", client_id)),
        }
    }
}

/// Customer in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Provider's customer ID.
    pub id: String,

    /// Customer email.
    pub email: Option<String>,
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Provider's customer ID.
    pub customer_id: String,

    /// Internal client ID (stored as metadata).
    pub client_id: ClientId,

    /// Price being purchased.
    pub price_id: String,

    /// Recurring subscription or one-off payment.
    pub mode: CheckoutMode,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for customer to complete checkout.
    pub url: Option<String>,
}

/// Subscription in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider's subscription ID.
    pub id: String,

    /// Provider's customer ID.
    pub customer_id: String,

    /// Current subscription status.
    pub status: SubscriptionStatus,

    /// Current billing period start (Unix timestamp).
    pub current_period_start: Option<i64>,

    /// Current billing period end (Unix timestamp).
    pub current_period_end: Option<i64>,

    /// Whether subscription cancels at period end.
    pub cancel_at_period_end: bool,

    /// When cancellation was requested (if applicable).
    pub canceled_at: Option<i64>,

    /// Subscription items (one per price).
    pub items: Vec<SubscriptionItem>,
}

impl Subscription {
    /// The item whose price is swapped on plan changes.
    pub fn first_item(&self) -> Option<&SubscriptionItem> {
        self.items.first()
    }

    pub fn period_start(&self) -> Option<DateTime<Utc>> {
        self.current_period_start.and_then(from_unix)
    }

    pub fn period_end(&self) -> Option<DateTime<Utc>> {
        self.current_period_end.and_then(from_unix)
    }
}

fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// A priced line of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    /// Provider's subscription item ID.
    pub id: String,

    /// Price currently attached to the item.
    pub price_id: Option<String>,
}

/// Subscription status from payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is active and current.
    Active,

    /// Payment is past due, grace period active.
    PastDue,

    /// Payment failed and the subscription is no longer being retried.
    Unpaid,

    /// Subscription is canceled.
    Canceled,

    /// Subscription is in trial period.
    Trialing,

    /// Initial payment incomplete.
    Incomplete,

    /// Payment failed after retries exhausted.
    IncompleteExpired,

    /// Subscription is paused.
    Paused,

    /// Unknown status from provider.
    #[serde(other)]
    Unknown,
}

/// A payment attempt of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's payment intent ID.
    pub id: String,

    /// Amount in the currency's smallest unit.
    pub amount: i64,

    /// Three-letter ISO currency code.
    pub currency: String,

    /// Provider status (`succeeded`, `requires_payment_method`, ...).
    pub status: String,

    /// Creation time (Unix timestamp).
    pub created: i64,

    pub description: Option<String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let code = match err.code {
            PaymentErrorCode::NotFound => ErrorCode::NotFound,
            PaymentErrorCode::InvalidRequest => ErrorCode::ValidationFailed,
            _ => ErrorCode::PaymentProviderError,
        };

        DomainError::new(code, err.message)
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Card was declined.
    CardDeclined,

    /// Request rejected as malformed by the provider.
    InvalidRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
