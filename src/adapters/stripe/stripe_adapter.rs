//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API.
//! Requests are form-encoded and authenticated with the secret key as the
//! basic-auth user; responses are decoded into `stripe_types` and converted
//! into port types.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, Customer, PaymentError,
    PaymentErrorCode, PaymentIntent, PaymentProvider, Subscription,
};

use super::stripe_types::{
    StripeCheckoutSession, StripeCustomer, StripeErrorBody, StripeList, StripePaymentIntent,
    StripeSubscription,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API, including the version segment.
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com/v1".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(self.config.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client
            .get(self.config.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
    }

    /// Sends the request and decodes a successful body as `T`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, PaymentError> {
        let response = request
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(operation, status = %status, error = %error_text, "Stripe request failed");
            return Err(map_error(status, &error_text));
        }

        response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })
    }
}

/// Maps a Stripe error response to a `PaymentError`, keeping Stripe's message.
fn map_error(status: StatusCode, body: &str) -> PaymentError {
    let detail = serde_json::from_str::<StripeErrorBody>(body).ok().map(|b| b.error);

    let code = match (status, detail.as_ref().and_then(|d| d.kind.as_deref())) {
        (_, Some("card_error")) | (StatusCode::PAYMENT_REQUIRED, _) => PaymentErrorCode::CardDeclined,
        (StatusCode::UNAUTHORIZED, _) | (StatusCode::FORBIDDEN, _) => {
            PaymentErrorCode::AuthenticationError
        }
        (StatusCode::NOT_FOUND, _) => PaymentErrorCode::NotFound,
        (StatusCode::TOO_MANY_REQUESTS, _) => PaymentErrorCode::RateLimitExceeded,
        (StatusCode::BAD_REQUEST, _) => PaymentErrorCode::InvalidRequest,
        _ => PaymentErrorCode::ProviderError,
    };

    let message = detail
        .as_ref()
        .and_then(|d| d.message.clone())
        .unwrap_or_else(|| format!("Stripe API error: {}", body));

    let error = PaymentError::new(code, message);
    match detail.and_then(|d| d.code) {
        Some(provider_code) => error.with_provider_code(provider_code),
        None => error,
    }
}

fn customer_params(request: &CreateCustomerRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![("metadata[client_id]", request.client_id.to_string())];
    if let Some(email) = request.email.as_ref().filter(|e| !e.is_empty()) {
        params.push(("email", email.clone()));
    }
    params
}

fn checkout_params(request: &CreateCheckoutRequest) -> Vec<(&'static str, String)> {
    vec![
        ("customer", request.customer_id.clone()),
        ("payment_method_types[0]", "card".to_string()),
        ("line_items[0][price]", request.price_id.clone()),
        ("line_items[0][quantity]", "1".to_string()),
        ("mode", request.mode.as_str().to_string()),
        ("success_url", request.success_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
        ("metadata[client_id]", request.client_id.to_string()),
        ("metadata[mode]", request.mode.as_str().to_string()),
    ]
}

fn price_change_params(item_id: &str, new_price_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("items[0][id]", item_id.to_string()),
        ("items[0][price]", new_price_id.to_string()),
        ("proration_behavior", "create_prorations".to_string()),
    ]
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let mut builder = self.post("/customers").form(&customer_params(&request));
        if let Some(key) = &request.idempotency_key {
            builder = builder.header("Idempotency-Key", key);
        }

        let customer: StripeCustomer = self.send(builder, "create_customer").await?;
        tracing::info!(client_id = %request.client_id, customer_id = %customer.id, "Stripe customer created");
        Ok(customer.into())
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let builder = self
            .post("/checkout/sessions")
            .form(&checkout_params(&request));
        let session: StripeCheckoutSession = self.send(builder, "create_checkout_session").await?;
        Ok(session.into())
    }

    async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription, PaymentError> {
        let builder = self.get(&format!("/subscriptions/{}", subscription_id));
        let sub: StripeSubscription = self.send(builder, "get_subscription").await?;
        Ok(sub.into())
    }

    async fn cancel_subscription_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, PaymentError> {
        let builder = self
            .post(&format!("/subscriptions/{}", subscription_id))
            .form(&[("cancel_at_period_end", "true")]);
        let sub: StripeSubscription = self.send(builder, "cancel_subscription").await?;
        Ok(sub.into())
    }

    async fn change_subscription_price(
        &self,
        subscription_id: &str,
        item_id: &str,
        new_price_id: &str,
    ) -> Result<Subscription, PaymentError> {
        let builder = self
            .post(&format!("/subscriptions/{}", subscription_id))
            .form(&price_change_params(item_id, new_price_id));
        let sub: StripeSubscription = self.send(builder, "update_subscription").await?;
        Ok(sub.into())
    }

    async fn list_payment_intents(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<PaymentIntent>, PaymentError> {
        let builder = self
            .get("/payment_intents")
            .query(&[("customer", customer_id.to_string()), ("limit", limit.to_string())]);
        let list: StripeList<StripePaymentIntent> = self.send(builder, "list_payment_intents").await?;
        Ok(list.data.into_iter().map(Into::into).collect())
    }
}
