//! Logging subscriber initialisation.

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Transport crates that are chatty at `info`.
const QUIET_TARGETS: [&str; 3] = ["h2", "hyper", "salvo_core"];

pub(super) fn init_subscriber(config: &ServerConfig) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.logging.log_level)));

    match config.logging.log_format {
        LogFormat::Compact => install(
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        ),
        LogFormat::Json => install(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true),
        ),
    }
}

/// `level` for our own crates, warnings only from the transport stack.
fn filter_directives(level: &str) -> String {
    let level = level.trim();

    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn install<L>(filter: EnvFilter, fmt_layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
