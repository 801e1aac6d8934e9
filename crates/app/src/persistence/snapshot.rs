//! Versioned state snapshots.

use fernwood::{
    money::{STORE_CURRENCY, float_to_minor},
    products::ProductId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::products::models::Product, persistence::PersistenceError};

/// Version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything the store persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub products: Vec<Product>,
}

impl Snapshot {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            products,
        }
    }
}

/// Product as written before snapshots were versioned: a bare JSON array with float prices.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProduct {
    id: String,
    name: String,
    sku: String,
    category: String,
    price: f64,
    stock: u32,
    #[serde(default)]
    image_url: Option<String>,
}

impl TryFrom<LegacyProduct> for Product {
    type Error = PersistenceError;

    fn try_from(legacy: LegacyProduct) -> Result<Self, Self::Error> {
        let id = ProductId::from(legacy.id);

        let price = float_to_minor(legacy.price, STORE_CURRENCY)
            .and_then(|minor| u64::try_from(minor).ok())
            .ok_or_else(|| PersistenceError::InvalidPrice(id.clone()))?;

        Ok(Product {
            id,
            name: legacy.name,
            sku: legacy.sku,
            category: legacy.category,
            price,
            stock: legacy.stock,
            image_url: legacy.image_url,
        })
    }
}

/// Upgrade any stored shape to the current snapshot.
///
/// # Errors
///
/// Returns an error for unknown shapes, versions newer than this build, or legacy prices that
/// can't be expressed in minor units.
pub fn migrate(value: Value) -> Result<Snapshot, PersistenceError> {
    match value {
        Value::Array(_) => {
            let legacy: Vec<LegacyProduct> = serde_json::from_value(value)?;

            let products = legacy
                .into_iter()
                .map(Product::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Snapshot::new(products))
        }
        Value::Object(ref fields) => {
            let version = fields
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(PersistenceError::InvalidFormat("missing version"))?;

            if version != u64::from(SNAPSHOT_VERSION) {
                return Err(PersistenceError::UnsupportedVersion(version));
            }

            Ok(serde_json::from_value(value)?)
        }
        _ => Err(PersistenceError::InvalidFormat(
            "expected a product array or a versioned object",
        )),
    }
}
