//! Server configuration module

use std::time::Duration;

use clap::Parser;
use fernwood_app::context::AppConfig;

use crate::config::{
    auth::SessionConfig,
    observability::{LoggingConfig, MetricsConfig},
    pos::PosConfig,
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod auth;
pub(crate) mod observability;
pub(crate) mod pos;
pub(crate) mod server;
pub(crate) mod store;

/// Fernwood JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "fernwood-json", about = "Fernwood JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Metrics settings.
    #[command(flatten)]
    pub metrics: MetricsConfig,

    /// Product store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Session settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Point of sale settings.
    #[command(flatten)]
    pub pos: PosConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application services.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            store_path: self.store.store_path.clone(),
            processing_delay: Duration::from_millis(self.pos.processing_delay_ms),
            session_ttl: self.session.ttl(),
            low_stock_threshold: self.store.low_stock_threshold,
            tax_rate: self.pos.tax_rate,
        }
    }
}
