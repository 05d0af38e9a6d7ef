//! Axum router for the billing server.

use axum::routing::{get, post};
use axum::Router;

use super::super::health::health;
use super::handlers::{
    cancel_subscription, create_checkout_session, payment_history, update_subscription,
    BillingAppState,
};

/// Routes relative to `/api`.
///
/// # Routes
/// - `POST /create-checkout-session` - Start a subscription or token-pack checkout
/// - `POST /cancel-subscription` - Cancel at period end
/// - `POST /update-subscription` - Switch plan with prorations
/// - `GET /payment-history` - Recent payment intents
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/cancel-subscription", post(cancel_subscription))
        .route("/update-subscription", post(update_subscription))
        .route("/payment-history", get(payment_history))
}

/// The complete billing server: `/api/*` plus `/health`.
pub fn billing_router(state: BillingAppState) -> Router {
    Router::new()
        .nest("/api", billing_routes())
        .route("/health", get(health))
        .with_state(state)
}
