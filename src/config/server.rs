//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the conversation server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Port of the billing server
    #[serde(default = "default_billing_port")]
    pub billing_port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// CORS allowed origins (comma-separated)
    pub cors_origins: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Socket address of the conversation server
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        Self::parse_addr(&self.host, self.port)
    }

    /// Socket address of the billing server
    pub fn billing_socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        Self::parse_addr(&self.host, self.billing_port)
    }

    fn parse_addr(host: &str, port: u16) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", host, port);
        raw.parse()
            .map_err(|_| ValidationError::InvalidSocketAddress(raw))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get CORS origins as a vector
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 || self.billing_port == 0 {
            return Err(ValidationError::InvalidPort);
        }

        // Assistant runs can take a while; leave room above the run timeout.
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        self.socket_addr()?;
        self.billing_socket_addr()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            billing_port: default_billing_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_billing_port() -> u16 {
    3002
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,nnia=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    150
}
