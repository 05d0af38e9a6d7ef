//! Errors shared by the billing handlers.

use crate::domain::foundation::DomainError;
use crate::ports::PaymentError;

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Client not found")]
    ClientNotFound,

    #[error("Unknown subscription price: {0}")]
    UnknownPrice(String),

    #[error("Subscription {0} has no items")]
    SubscriptionHasNoItems(String),

    #[error("{}", .0.message)]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Store(#[from] DomainError),
}

impl BillingError {
    /// True for errors caused by the request rather than a dependency.
    pub fn is_client_error(&self) -> bool {
        matches!(self, BillingError::ClientNotFound | BillingError::UnknownPrice(_))
    }
}
