//! HTTP DTOs for the billing endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::{
    CreateCheckoutSessionCommand, UpdateSubscriptionCommand,
};
use crate::domain::billing::CheckoutMode;
use crate::domain::foundation::ClientId;
use crate::ports::{PaymentIntent, Subscription};

use super::super::error::ApiError;

/// Error text for an unknown or malformed `clientId` on checkout.
pub const CLIENT_NOT_FOUND: &str = "Client not found";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /api/create-checkout-session`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    pub price_id: Option<String>,
    pub client_id: Option<String>,
    /// Defaults to `subscription`.
    pub mode: Option<CheckoutMode>,
}

impl CreateCheckoutSessionRequest {
    /// An id that cannot name a client is reported the same way as an
    /// unknown one.
    pub fn into_command(self, return_origin: String) -> Result<CreateCheckoutSessionCommand, ApiError> {
        let price_id = required(self.price_id, "priceId")?;
        let client_id = self
            .client_id
            .as_deref()
            .and_then(|raw| ClientId::parse(raw).ok())
            .ok_or_else(|| ApiError::bad_request(CLIENT_NOT_FOUND))?;

        Ok(CreateCheckoutSessionCommand {
            client_id,
            price_id,
            mode: self.mode.unwrap_or(CheckoutMode::Subscription),
            return_origin,
        })
    }
}

/// `POST /api/cancel-subscription`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionRequest {
    pub subscription_id: Option<String>,
}

impl CancelSubscriptionRequest {
    pub fn subscription_id(self) -> Result<String, ApiError> {
        required(self.subscription_id, "subscriptionId")
    }
}

/// `POST /api/update-subscription`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub subscription_id: Option<String>,
    pub new_price_id: Option<String>,
}

impl UpdateSubscriptionRequest {
    pub fn into_command(self) -> Result<UpdateSubscriptionCommand, ApiError> {
        Ok(UpdateSubscriptionCommand {
            subscription_id: required(self.subscription_id, "subscriptionId")?,
            new_price_id: required(self.new_price_id, "newPriceId")?,
        })
    }
}

/// `GET /api/payment-history?clientId=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryQuery {
    pub client_id: Option<String>,
}

impl PaymentHistoryQuery {
    pub fn client_id(&self) -> Result<ClientId, ApiError> {
        let raw = self
            .client_id
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("clientId is required"))?;
        Ok(ClientId::parse(raw)?)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub success: bool,
    pub subscription: Subscription,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistoryResponse {
    pub payments: Vec<PaymentIntent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: &str = "6f1c2a8e-2f43-4a55-9a77-0d9c2b1f0e11";

    #[test]
    fn checkout_defaults_to_subscription_mode() {
        let json = format!(r#"{{"priceId": "price_pro", "clientId": "{}"}}"#, CLIENT);
        let request: CreateCheckoutSessionRequest = serde_json::from_str(&json).unwrap();
        let cmd = request.into_command("https://app.example".to_string()).unwrap();

        assert_eq!(cmd.mode, CheckoutMode::Subscription);
        assert_eq!(cmd.price_id, "price_pro");
        assert_eq!(cmd.return_origin, "https://app.example");
    }

    #[test]
    fn checkout_reads_payment_mode() {
        let json = format!(
            r#"{{"priceId": "price_pack", "clientId": "{}", "mode": "payment"}}"#,
            CLIENT
        );
        let request: CreateCheckoutSessionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(
            request.into_command(String::new()).unwrap().mode,
            CheckoutMode::Payment
        );
    }

    #[test]
    fn malformed_client_id_reads_as_unknown_client() {
        let request = CreateCheckoutSessionRequest {
            price_id: Some("price_pro".to_string()),
            client_id: Some("nope".to_string()),
            mode: None,
        };
        assert_eq!(
            request.into_command(String::new()).unwrap_err(),
            ApiError::BadRequest(CLIENT_NOT_FOUND.to_string())
        );
    }

    #[test]
    fn update_requires_new_price() {
        let request = UpdateSubscriptionRequest {
            subscription_id: Some("sub_1".to_string()),
            new_price_id: Some(" ".to_string()),
        };
        assert_eq!(
            request.into_command().unwrap_err(),
            ApiError::BadRequest("newPriceId is required".to_string())
        );
    }

    #[test]
    fn checkout_response_uses_camel_case() {
        let json = serde_json::to_value(CheckoutSessionResponse {
            session_id: "cs_1".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "sessionId": "cs_1" }));
    }
}
