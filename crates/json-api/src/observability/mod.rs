//! Observability setup and request tracing middleware.

use thiserror::Error;

use crate::config::ServerConfig;

mod logging;
mod metrics;
mod request;
mod settings;

pub(crate) use metrics::{metrics_handler, record_sale};
pub(crate) use request::request_logging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the log subscriber and apply request logging settings.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply_runtime_config(config);

    logging::init_subscriber(config)
}
