//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe:
//! - Customer provisioning
//! - Checkout sessions (subscriptions and one-off token packs)
//! - Subscription cancellation and price changes
//! - Payment history
//!
//! # Configuration
//!
//! - `NNIA__PAYMENT__STRIPE_API_KEY`: Stripe secret API key
//! - `NNIA__PAYMENT__API_BASE_URL`: override for tests against a local stub

mod mock_payment_provider;
mod stripe_adapter;
mod stripe_types;

pub use mock_payment_provider::{sample_subscription, MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
pub use stripe_types::{
    StripeCheckoutSession, StripeCustomer, StripeList, StripePaymentIntent, StripeSubscription,
};
