//! Billing server: `/api/*` and `/health`.

use std::sync::Arc;

use tracing::info;

use nnia::adapters::http::billing::{billing_router, BillingAppState};
use nnia::adapters::http::middleware::with_common_layers;
use nnia::adapters::postgres::{PostgresClientRepository, PostgresSubscriptionRepository};
use nnia::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use nnia::config::{AppConfig, Service};
use nnia::runtime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    runtime::init_tracing(&config.server);
    config.validate(Service::Billing)?;

    let pool = runtime::connect_pool(&config.database).await?;
    let stripe = StripeConfig::new(config.payment.stripe_api_key.clone())
        .with_base_url(config.payment.api_base_url.clone());
    info!(test_mode = config.payment.is_test_mode(), "Stripe adapter ready");

    let state = BillingAppState {
        clients: Arc::new(PostgresClientRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool)),
        payment_provider: Arc::new(StripePaymentAdapter::new(stripe)),
        default_return_origin: config.payment.default_return_origin.clone(),
    };

    let app = with_common_layers(billing_router(state), &config.server);
    runtime::serve(app, config.server.billing_socket_addr()?, runtime::shutdown_token()).await?;
    Ok(())
}
