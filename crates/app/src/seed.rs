//! Seed Data
//!
//! The bundled YAML documents a fresh store starts from.

use fernwood::{
    fixtures::{FixtureError, parse_price},
    money::STORE_CURRENCY,
    products::ProductId,
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    auth::Credential,
    domain::{
        categories::models::Category, customers::models::Customer, orders::models::Order,
        products::models::Product, suppliers::models::Supplier,
        transactions::models::Transaction, users::models::User,
    },
};

const PRODUCTS: &str = include_str!("../seed/products.yml");
const CATEGORIES: &str = include_str!("../seed/categories.yml");
const CUSTOMERS: &str = include_str!("../seed/customers.yml");
const SUPPLIERS: &str = include_str!("../seed/suppliers.yml");
const USERS: &str = include_str!("../seed/users.yml");
const ORDERS: &str = include_str!("../seed/orders.yml");
const TRANSACTIONS: &str = include_str!("../seed/transactions.yml");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to parse seed data: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("seed product {0} must be priced in {expected}", expected = STORE_CURRENCY.iso_alpha_code)]
    ForeignCurrency(String),

    #[error("seed product {0} has a negative price")]
    NegativePrice(String),
}

#[derive(Debug, Deserialize)]
struct ProductSeed {
    id: String,
    name: String,
    sku: String,
    category: String,

    /// e.g. `1299.99 GHS`
    price: String,

    #[serde(default)]
    stock: u32,

    #[serde(default)]
    image_url: Option<String>,
}

impl ProductSeed {
    fn into_product(self) -> Result<Product, SeedError> {
        let (minor, currency) = parse_price(&self.price)?;

        if currency != STORE_CURRENCY {
            return Err(SeedError::ForeignCurrency(self.id));
        }

        let price = u64::try_from(minor).map_err(|_err| SeedError::NegativePrice(self.id.clone()))?;

        Ok(Product {
            id: ProductId::from(self.id),
            name: self.name,
            sku: self.sku,
            category: self.category,
            price,
            stock: self.stock,
            image_url: self.image_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UserSeed {
    #[serde(flatten)]
    user: User,

    #[serde(default)]
    password_digest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductsDocument {
    products: Vec<ProductSeed>,
}

#[derive(Debug, Deserialize)]
struct CategoriesDocument {
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct CustomersDocument {
    customers: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct SuppliersDocument {
    suppliers: Vec<Supplier>,
}

#[derive(Debug, Deserialize)]
struct UsersDocument {
    users: Vec<UserSeed>,
}

#[derive(Debug, Deserialize)]
struct OrdersDocument {
    orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
struct TransactionsDocument {
    transactions: Vec<Transaction>,
}

/// Everything a fresh store starts with.
#[derive(Debug, Clone)]
pub struct Seed {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub users: Vec<User>,
    pub credentials: Vec<Credential>,
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
}

impl Seed {
    /// Parse the seed data bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if any bundled document is malformed.
    pub fn bundled() -> Result<Self, SeedError> {
        let products = serde_norway::from_str::<ProductsDocument>(PRODUCTS)?
            .products
            .into_iter()
            .map(ProductSeed::into_product)
            .collect::<Result<Vec<_>, _>>()?;

        let users = serde_norway::from_str::<UsersDocument>(USERS)?.users;

        let credentials = users
            .iter()
            .filter_map(|seed| {
                seed.password_digest.as_ref().map(|digest| Credential {
                    user: seed.user.uuid,
                    password_digest: digest.clone(),
                })
            })
            .collect();

        Ok(Self {
            products,
            categories: serde_norway::from_str::<CategoriesDocument>(CATEGORIES)?.categories,
            customers: serde_norway::from_str::<CustomersDocument>(CUSTOMERS)?.customers,
            suppliers: serde_norway::from_str::<SuppliersDocument>(SUPPLIERS)?.suppliers,
            users: users.into_iter().map(|seed| seed.user).collect(),
            credentials,
            orders: serde_norway::from_str::<OrdersDocument>(ORDERS)?.orders,
            transactions: serde_norway::from_str::<TransactionsDocument>(TRANSACTIONS)?
                .transactions,
        })
    }
}
