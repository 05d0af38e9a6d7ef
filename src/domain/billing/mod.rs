//! Billing domain module.
//!
//! Plan catalog and the checkout modes the payment processor understands.

mod catalog;

pub use catalog::{find_by_price_id, plan_for_price, Plan, PlanKind, PLANS, TOKEN_PACKS};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder the payment processor replaces with the session id when it
/// redirects back after checkout.
pub const CHECKOUT_SESSION_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Checkout mode: recurring subscription or one-off payment (token packs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Subscription,
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Subscription => "subscription",
            CheckoutMode::Payment => "payment",
        }
    }
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
