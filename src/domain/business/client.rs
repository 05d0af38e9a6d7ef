//! SaaS client account.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ClientId;

/// A business owner account. Created outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub email: Option<String>,
    pub business_name: Option<String>,
    /// Payment processor customer, assigned once on first checkout.
    pub stripe_customer_id: Option<String>,
}

impl Client {
    /// Returns the customer id if one has been provisioned.
    pub fn customer_id(&self) -> Option<&str> {
        self.stripe_customer_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}
