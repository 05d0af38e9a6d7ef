//! Billing handlers.
//!
//! ## Commands
//! - Starting a checkout (subscription or token pack)
//! - Cancelling a subscription at period end
//! - Changing a subscription's plan
//!
//! ## Queries
//! - Payment history

mod cancel_subscription;
mod create_checkout_session;
mod error;
mod get_payment_history;
mod update_subscription;

pub use cancel_subscription::CancelSubscriptionHandler;
pub use create_checkout_session::{CreateCheckoutSessionCommand, CreateCheckoutSessionHandler};
pub use error::BillingError;
pub use get_payment_history::GetPaymentHistoryHandler;
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};
