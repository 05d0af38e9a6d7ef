//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NNIA` prefix and nested values use double underscores as separators.
//!
//! Both binaries read the same configuration; each validates only the sections
//! it needs (see [`Service`]).
//!
//! # Example
//!
//! ```no_run
//! use nnia::config::{AppConfig, Service};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate(Service::Conversation).expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod database;
mod error;
mod payment;
mod server;

pub use ai::{AiConfig, AiMode};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "NNIA";

/// Which server is starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// `/nnia` routes: respond, appointments, availability, notifications
    Conversation,
    /// `/api` routes: checkout, subscription changes, payment history
    Billing,
}

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, ports, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// AI provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Payment configuration (Stripe)
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NNIA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NNIA__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `NNIA__AI__ASSISTANT_ID=asst_...` -> `ai.assistant_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the given service depends on
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self, service: Service) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        match service {
            Service::Conversation => self.ai.validate()?,
            Service::Billing => self.payment.validate()?,
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [(&str, &str); 4] = [
        ("NNIA__DATABASE__URL", "postgres://nnia@localhost/nnia"),
        ("NNIA__AI__OPENAI_API_KEY", "sk-test-xxx"),
        ("NNIA__AI__ASSISTANT_ID", "asst_xxx"),
        ("NNIA__PAYMENT__STRIPE_API_KEY", "sk_test_xxx"),
    ];

    fn set_minimal_env() {
        for (key, value) in VARS {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in VARS {
            env::remove_var(key);
        }
        env::remove_var("NNIA__SERVER__PORT");
        env::remove_var("NNIA__SERVER__ENVIRONMENT");
        env::remove_var("NNIA__AI__MODE");
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgres://nnia@localhost/nnia");
        assert_eq!(config.ai.assistant_id.as_deref(), Some("asst_xxx"));
        assert_eq!(config.payment.stripe_api_key, "sk_test_xxx");
    }

    #[test]
    fn test_validate_both_services() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert!(config.validate(Service::Conversation).is_ok());
        assert!(config.validate(Service::Billing).is_ok());
    }

    #[test]
    fn test_billing_ignores_ai_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut config = load_with(&[]).unwrap();
        config.ai.openai_api_key = None;

        assert!(config.validate(Service::Billing).is_ok());
        assert!(config.validate(Service::Conversation).is_err());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("NNIA__SERVER__PORT", "4000"),
            ("NNIA__SERVER__ENVIRONMENT", "production"),
            ("NNIA__AI__MODE", "chat"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert!(config.is_production());
        assert_eq!(config.ai.mode, AiMode::Chat);
    }
}
