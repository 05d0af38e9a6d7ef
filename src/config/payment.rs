//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    #[serde(default)]
    pub stripe_api_key: String,

    /// Stripe API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Origin used for checkout return URLs when the request has no `Origin`
    #[serde(default = "default_return_origin")]
    pub default_return_origin: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }

        // Publishable keys (pk_) cannot call the API
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }

        if !self.default_return_origin.starts_with("http://")
            && !self.default_return_origin.starts_with("https://")
        {
            return Err(ValidationError::InvalidReturnOrigin);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            api_base_url: default_api_base_url(),
            default_return_origin: default_return_origin(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com/v1".to_string()
}

fn default_return_origin() -> String {
    "http://localhost:5173".to_string()
}
