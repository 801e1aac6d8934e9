//! Store Config

use std::path::PathBuf;

use clap::Args;
use fernwood::products::DEFAULT_LOW_STOCK_THRESHOLD;

/// Product store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// JSON file the product list is kept in; in memory when omitted
    #[arg(long, env = "FERNWOOD_STORE_PATH")]
    pub store_path: Option<PathBuf>,

    /// Stock level at or below which a product counts as low stock
    #[arg(long, env = "LOW_STOCK_THRESHOLD", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub low_stock_threshold: u32,
}
