//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(
        short = 'H',
        long = "server-host",
        env = "SERVER_HOST",
        default_value = "0.0.0.0"
    )]
    pub host: String,

    /// Server port
    #[arg(short, long = "server-port", env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(
        long = "server-shutdown-timeout",
        env = "SERVER_SHUTDOWN_TIMEOUT",
        default_value_t = 10
    )]
    pub shutdown_timeout_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Grace period for shutdown.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}
