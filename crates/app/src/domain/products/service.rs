//! Products service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use fernwood::{catalog::Catalog, money::STORE_CURRENCY, products::ProductId};
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::{
        next_sequence_id,
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product, ProductFilter, ProductSort, ProductUpdate},
        },
    },
    listing::{matches_any, search_needle},
    persistence::{Snapshot, StateStore},
};

const PRODUCT_ID_PREFIX: &str = "PROD-";

pub struct InMemoryProductsService {
    products: RwLock<Vec<Product>>,
    store: Arc<dyn StateStore>,
    low_stock_threshold: u32,
}

impl InMemoryProductsService {
    /// Load products from the store, falling back to `seed` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state can't be read.
    pub async fn load(
        store: Arc<dyn StateStore>,
        seed: Vec<Product>,
        low_stock_threshold: u32,
    ) -> Result<Self, ProductsServiceError> {
        let products = match store.load().await? {
            Some(snapshot) => snapshot.products,
            None => seed,
        };

        info!(products = products.len(), "products loaded");

        Ok(Self {
            products: RwLock::new(products),
            store,
            low_stock_threshold,
        })
    }

    async fn persist(&self, products: &[Product]) -> Result<(), ProductsServiceError> {
        self.store.save(&Snapshot::new(products.to_vec())).await?;

        Ok(())
    }
}

impl fmt::Debug for InMemoryProductsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryProductsService")
            .field("low_stock_threshold", &self.low_stock_threshold)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for InMemoryProductsService {
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let needle = search_needle(filter.search.as_deref());
        let products = self.products.read().await;

        let mut matching: Vec<Product> = products
            .iter()
            .filter(|product| {
                matches_any(
                    needle.as_deref(),
                    &[product.name.as_str(), product.sku.as_str()],
                )
            })
            .filter(|product| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|category| product.category.eq_ignore_ascii_case(category))
            })
            .filter(|product| {
                filter
                    .status
                    .is_none_or(|status| product.status(self.low_stock_threshold) == status)
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = match filter.sort {
                ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                ProductSort::Price => a.price.cmp(&b.price),
                ProductSort::Stock => a.stock.cmp(&b.stock),
            };

            filter.order.apply(ordering)
        });

        Ok(matching)
    }

    async fn get_product(&self, product: &ProductId) -> Result<Product, ProductsServiceError> {
        self.products
            .read()
            .await
            .iter()
            .find(|candidate| &candidate.id == product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    #[tracing::instrument(skip(self, product), fields(sku = %product.sku))]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let name = required(&product.name, "name")?;
        let sku = required(&product.sku, "sku")?;

        let mut products = self.products.write().await;

        if products.iter().any(|existing| existing.sku.eq_ignore_ascii_case(&sku)) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let created = Product {
            id: ProductId::new(next_sequence_id(
                PRODUCT_ID_PREFIX,
                6,
                products.iter().map(|existing| existing.id.as_str()),
            )),
            name,
            sku,
            category: product.category.trim().to_lowercase(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
        };

        let mut next = products.clone();

        next.insert(0, created.clone());
        self.persist(&next).await?;
        *products = next;

        info!(product = %created.id, "product created");

        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_product(
        &self,
        product: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut products = self.products.write().await;
        let mut next = products.clone();

        let position = next
            .iter()
            .position(|candidate| &candidate.id == product)
            .ok_or(ProductsServiceError::NotFound)?;

        if let Some(sku) = update.sku.as_deref() {
            let sku = required(sku, "sku")?;

            let taken = next
                .iter()
                .any(|other| &other.id != product && other.sku.eq_ignore_ascii_case(&sku));

            if taken {
                return Err(ProductsServiceError::AlreadyExists);
            }
        }

        let name = update.name.as_deref().map(|name| required(name, "name")).transpose()?;

        let target = next.get_mut(position).ok_or(ProductsServiceError::NotFound)?;

        if let Some(name) = name {
            target.name = name;
        }

        if let Some(sku) = update.sku {
            target.sku = sku.trim().to_string();
        }

        if let Some(category) = update.category {
            target.category = category.trim().to_lowercase();
        }

        if let Some(price) = update.price {
            target.price = price;
        }

        if let Some(stock) = update.stock {
            target.stock = stock;
        }

        if update.image_url.is_some() {
            target.image_url = update.image_url;
        }

        let updated = target.clone();

        self.persist(&next).await?;
        *products = next;

        info!("product updated");

        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_product(&self, product: &ProductId) -> Result<(), ProductsServiceError> {
        let mut products = self.products.write().await;
        let mut next = products.clone();
        let before = next.len();

        next.retain(|candidate| &candidate.id != product);

        if next.len() == before {
            return Err(ProductsServiceError::NotFound);
        }

        self.persist(&next).await?;
        *products = next;

        info!("product deleted");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_stock(
        &self,
        product: &ProductId,
        stock: u32,
    ) -> Result<Product, ProductsServiceError> {
        self.update_product(
            product,
            ProductUpdate {
                stock: Some(stock),
                ..ProductUpdate::default()
            },
        )
        .await
    }

    async fn catalog(&self) -> Result<Catalog<'static>, ProductsServiceError> {
        let products = self.products.read().await;

        let entries = products
            .iter()
            .map(Product::to_catalog_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog::with_products(entries, STORE_CURRENCY)?)
    }

    fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ProductsServiceError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ProductsServiceError::MissingRequiredData(field));
    }

    Ok(trimmed.to_string())
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Products matching the filter, sorted as requested.
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: &ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a new product with the next free `PROD-` id.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Applies a partial update.
    async fn update_product(
        &self,
        product: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: &ProductId) -> Result<(), ProductsServiceError>;

    /// Sets the stock level.
    async fn update_stock(
        &self,
        product: &ProductId,
        stock: u32,
    ) -> Result<Product, ProductsServiceError>;

    /// Snapshot of the product list as a till catalog.
    async fn catalog(&self) -> Result<Catalog<'static>, ProductsServiceError>;

    /// Stock level at or below which a product is running low.
    fn low_stock_threshold(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use fernwood::products::StockStatus;
    use testresult::TestResult;

    use crate::{
        listing::SortOrder,
        persistence::{MemoryStore, MockStateStore, PersistenceError},
        test::TestContext,
    };

    use super::*;

    fn new_product(name: &str, sku: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            sku: sku.to_string(),
            category: "Chairs".to_string(),
            price: 15_000,
            stock: 4,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_product_assigns_next_id_and_prepends() -> TestResult {
        let ctx = TestContext::new().await?;

        let product = ctx
            .products
            .create_product(new_product("Rocking Chair", "FUR-CHA-009"))
            .await?;

        assert_eq!(product.id.as_str(), "PROD-000006");
        assert_eq!(product.category, "chairs");

        let listed = ctx.products.list_products(&ProductFilter::default()).await?;

        assert!(listed.iter().any(|candidate| candidate.id == product.id));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_duplicate_sku_ignoring_case() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .products
            .create_product(new_product("Another Sofa", "fur-sof-001"))
            .await;

        assert!(matches!(result, Err(ProductsServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_requires_name() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .products
            .create_product(new_product("  ", "FUR-NEW-001"))
            .await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::MissingRequiredData("name"))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_status_and_sorts_by_price() -> TestResult {
        let ctx = TestContext::new().await?;

        let low = ctx
            .products
            .list_products(&ProductFilter {
                status: Some(StockStatus::LowStock),
                sort: ProductSort::Price,
                order: SortOrder::Desc,
                ..ProductFilter::default()
            })
            .await?;

        let skus: Vec<&str> = low.iter().map(|product| product.sku.as_str()).collect();

        assert_eq!(skus, vec!["FUR-DIN-001", "FUR-TAB-002"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_searches_name_and_sku() -> TestResult {
        let ctx = TestContext::new().await?;

        let found = ctx
            .products
            .list_products(&ProductFilter {
                search: Some("cha".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|product| product.sku.as_str()), Some("FUR-CHA-001"));

        Ok(())
    }

    #[tokio::test]
    async fn update_stock_changes_derived_status() -> TestResult {
        let ctx = TestContext::new().await?;
        let bed = ProductId::from("PROD-003");

        let updated = ctx.products.update_stock(&bed, 12).await?;

        assert_eq!(
            updated.status(ctx.products.low_stock_threshold()),
            StockStatus::InStock
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_rejects_sku_of_another_product() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .products
            .update_product(
                &ProductId::from("PROD-002"),
                ProductUpdate {
                    sku: Some("FUR-SOF-001".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductsServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.products.delete_product(&ProductId::from("PROD-999")).await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn changes_are_written_to_the_store() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let service = InMemoryProductsService::load(store.clone(), Vec::new(), 5).await?;

        service
            .create_product(new_product("Bar Stool", "FUR-STL-001"))
            .await?;

        let saved = store.load().await?.ok_or("nothing saved")?;

        assert_eq!(saved.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_save_leaves_products_unchanged() -> TestResult {
        let mut store = MockStateStore::new();

        store.expect_load().once().returning(|| Ok(None));
        store.expect_save().once().returning(|_| {
            Err(PersistenceError::InvalidFormat("disk full"))
        });

        let service = InMemoryProductsService::load(Arc::new(store), Vec::new(), 5).await?;

        let result = service
            .create_product(new_product("Bar Stool", "FUR-STL-001"))
            .await;

        assert!(matches!(result, Err(ProductsServiceError::Storage(_))));
        assert!(service.list_products(&ProductFilter::default()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn catalog_mirrors_the_product_list() -> TestResult {
        let ctx = TestContext::new().await?;

        let catalog = ctx.products.catalog().await?;

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.filter("sofa").len(), 1);

        Ok(())
    }
}
