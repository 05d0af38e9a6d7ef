//! HTTP handlers for the billing endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CancelSubscriptionHandler, CreateCheckoutSessionHandler, GetPaymentHistoryHandler,
    UpdateSubscriptionHandler,
};
use crate::ports::{ClientRepository, PaymentProvider, SubscriptionRepository};

use super::super::error::ApiError;
use super::dto::{
    CancelSubscriptionRequest, CheckoutSessionResponse, CreateCheckoutSessionRequest,
    PaymentHistoryQuery, PaymentHistoryResponse, SubscriptionResponse, UpdateSubscriptionRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the billing server, cloned per request.
#[derive(Clone)]
pub struct BillingAppState {
    pub clients: Arc<dyn ClientRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    /// Used for checkout return URLs when the request has no `Origin`.
    pub default_return_origin: String,
}

impl BillingAppState {
    pub fn create_checkout_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.clients.clone(), self.payment_provider.clone())
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.subscriptions.clone(), self.payment_provider.clone())
    }

    pub fn update_subscription_handler(&self) -> UpdateSubscriptionHandler {
        UpdateSubscriptionHandler::new(self.subscriptions.clone(), self.payment_provider.clone())
    }

    pub fn payment_history_handler(&self) -> GetPaymentHistoryHandler {
        GetPaymentHistoryHandler::new(self.clients.clone(), self.payment_provider.clone())
    }

    fn return_origin(&self, headers: &HeaderMap) -> String {
        headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty() && *v != "null")
            .unwrap_or(self.default_return_origin.as_str())
            .to_string()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/create-checkout-session
pub async fn create_checkout_session(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Result<Json<CreateCheckoutSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = request.into_command(state.return_origin(&headers))?;

    let session = state.create_checkout_session_handler().handle(cmd).await?;

    Ok(Json(CheckoutSessionResponse {
        session_id: session.id,
    }))
}

/// POST /api/cancel-subscription
pub async fn cancel_subscription(
    State(state): State<BillingAppState>,
    body: Result<Json<CancelSubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let subscription_id = request.subscription_id()?;

    let subscription = state
        .cancel_subscription_handler()
        .handle(&subscription_id)
        .await?;

    Ok(Json(SubscriptionResponse {
        success: true,
        subscription,
    }))
}

/// POST /api/update-subscription
pub async fn update_subscription(
    State(state): State<BillingAppState>,
    body: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = request.into_command()?;

    let subscription = state.update_subscription_handler().handle(cmd).await?;

    Ok(Json(SubscriptionResponse {
        success: true,
        subscription,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/payment-history?clientId=
pub async fn payment_history(
    State(state): State<BillingAppState>,
    Query(query): Query<PaymentHistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id = query.client_id()?;
    let payments = state.payment_history_handler().handle(client_id).await?;

    Ok(Json(PaymentHistoryResponse { payments }))
}
