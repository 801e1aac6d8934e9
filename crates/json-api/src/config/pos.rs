//! Point of Sale Config

use clap::Args;
use rust_decimal::Decimal;

/// Register settings.
#[derive(Debug, Args)]
pub struct PosConfig {
    /// Simulated card terminal latency in milliseconds
    #[arg(
        long = "pos-processing-delay-ms",
        env = "POS_PROCESSING_DELAY_MS",
        default_value_t = 1_500
    )]
    pub processing_delay_ms: u64,

    /// Sales tax rate in percentage points, overriding the stored setting
    #[arg(long = "pos-tax-rate", env = "POS_TAX_RATE")]
    pub tax_rate: Option<Decimal>,
}
