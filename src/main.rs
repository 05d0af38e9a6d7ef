//! Conversation server: `/nnia/*` and `/health`.

use std::sync::Arc;

use tracing::info;

use nnia::adapters::ai::gateway_from_config;
use nnia::adapters::http::middleware::with_common_layers;
use nnia::adapters::http::nnia::{nnia_router, NniaAppState};
use nnia::adapters::postgres::{
    PostgresAppointmentRepository, PostgresBusinessInfoRepository,
    PostgresNotificationRepository,
};
use nnia::config::{AppConfig, Service};
use nnia::runtime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    runtime::init_tracing(&config.server);
    config.validate(Service::Conversation)?;

    let pool = runtime::connect_pool(&config.database).await?;
    let gateway = gateway_from_config(&config.ai)?;
    info!(strategy = gateway.strategy(), "Assistant gateway ready");

    let shutdown = runtime::shutdown_token();
    let state = NniaAppState {
        business_info: Arc::new(PostgresBusinessInfoRepository::new(pool.clone())),
        appointments: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        notifications: Arc::new(PostgresNotificationRepository::new(pool)),
        gateway,
        shutdown: shutdown.clone(),
    };

    let app = with_common_layers(nnia_router(state), &config.server);
    runtime::serve(app, config.server.socket_addr()?, shutdown).await?;
    Ok(())
}
