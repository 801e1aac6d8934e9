//! App Context

use std::{path::PathBuf, sync::Arc, time::Duration};

use fernwood::{
    pricing::{PricingError, TaxRate},
    products::DEFAULT_LOW_STOCK_THRESHOLD,
};
use jiff::SignedDuration;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, DEFAULT_SESSION_TTL, InMemoryAuthService},
    domain::{
        categories::{CategoriesService, InMemoryCategoriesService},
        customers::{CustomersService, InMemoryCustomersService},
        orders::{InMemoryOrdersService, OrdersService},
        pos::{DEFAULT_PROCESSING_DELAY, InMemoryPosService, PosService},
        products::{InMemoryProductsService, ProductsService, ProductsServiceError},
        reports::{LiveReportsService, ReportsService},
        returns::{InMemoryReturnsService, ReturnsService},
        settings::{InMemorySettingsService, SettingsService, models::Settings},
        suppliers::{InMemorySuppliersService, SuppliersService},
        transactions::{InMemoryTransactionsService, TransactionsService},
        users::{InMemoryUsersService, UsersService},
    },
    persistence::{JsonFileStore, MemoryStore, StateStore},
    seed::{Seed, SeedError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load seed data")]
    Seed(#[from] SeedError),

    #[error("failed to load products")]
    Products(#[from] ProductsServiceError),

    #[error("invalid tax rate")]
    TaxRate(#[from] PricingError),
}

/// Knobs for building an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file products are kept in. `None` keeps them in memory.
    pub store_path: Option<PathBuf>,

    /// Simulated card terminal latency
    pub processing_delay: Duration,

    pub session_ttl: SignedDuration,
    pub low_stock_threshold: u32,

    /// Overrides the default tax rate, in percentage points
    pub tax_rate: Option<Decimal>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            processing_delay: DEFAULT_PROCESSING_DELAY,
            session_ttl: DEFAULT_SESSION_TTL,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            tax_rate: None,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub customers: Arc<dyn CustomersService>,
    pub suppliers: Arc<dyn SuppliersService>,
    pub users: Arc<dyn UsersService>,
    pub orders: Arc<dyn OrdersService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub returns: Arc<dyn ReturnsService>,
    pub settings: Arc<dyn SettingsService>,
    pub reports: Arc<dyn ReportsService>,
    pub pos: Arc<dyn PosService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the application from the bundled seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data is malformed or the product store can't be read.
    pub async fn build(config: AppConfig) -> Result<Self, AppInitError> {
        Self::from_seed(Seed::bundled()?, config).await
    }

    /// Build the application from explicit seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the product store can't be read or the tax rate is out of range.
    pub async fn from_seed(seed: Seed, config: AppConfig) -> Result<Self, AppInitError> {
        let store: Arc<dyn StateStore> = match &config.store_path {
            Some(path) => {
                info!(path = %path.display(), "using JSON file store");

                Arc::new(JsonFileStore::new(path))
            }
            None => Arc::new(MemoryStore::new()),
        };

        let mut settings = Settings::default();

        if let Some(points) = config.tax_rate {
            settings.tax_rate = TaxRate::from_percent_points(points)?.percent_points();
        }

        let products: Arc<dyn ProductsService> = Arc::new(
            InMemoryProductsService::load(store, seed.products, config.low_stock_threshold)
                .await?,
        );

        let users: Arc<dyn UsersService> = Arc::new(InMemoryUsersService::new(seed.users));
        let customers: Arc<dyn CustomersService> =
            Arc::new(InMemoryCustomersService::new(seed.customers));
        let transactions: Arc<dyn TransactionsService> =
            Arc::new(InMemoryTransactionsService::new(seed.transactions));
        let settings: Arc<dyn SettingsService> = Arc::new(InMemorySettingsService::new(settings));

        Ok(Self {
            auth: Arc::new(InMemoryAuthService::new(
                seed.credentials,
                users.clone(),
                config.session_ttl,
            )),
            categories: Arc::new(InMemoryCategoriesService::new(seed.categories)),
            suppliers: Arc::new(InMemorySuppliersService::new(seed.suppliers)),
            orders: Arc::new(InMemoryOrdersService::new(seed.orders)),
            returns: Arc::new(InMemoryReturnsService::new(transactions.clone())),
            reports: Arc::new(LiveReportsService::new(
                products.clone(),
                transactions.clone(),
            )),
            pos: Arc::new(InMemoryPosService::new(
                products.clone(),
                customers.clone(),
                transactions.clone(),
                settings.clone(),
                config.processing_delay,
            )),
            products,
            customers,
            users,
            transactions,
            settings,
        })
    }
}
