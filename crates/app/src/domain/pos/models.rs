//! POS Models
//!
//! Amounts are signed minor units, as the pricing engine works in.

use fernwood::{
    cart::{Cart, CartLine},
    checkout::{Checkout, CheckoutState, PaymentMethod, change_due},
    discounts::DiscountRequest,
    money::STORE_CURRENCY,
    pricing::{CartTotals, PricingError, TaxRate},
    products::{Product as CatalogProduct, ProductId, StockStatus},
};
use rust_decimal::Decimal;
use rusty_money::Money;
use serde::{Deserialize, Serialize};

use crate::domain::{customers::models::Customer, transactions::models::Transaction};

/// Product as offered on the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: i64,
    pub stock: u32,
    pub status: StockStatus,
}

impl CatalogItem {
    #[must_use]
    pub fn new(product: &CatalogProduct<'_>, low_stock_threshold: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price.to_minor_units(),
            stock: product.stock,
            status: StockStatus::from_stock(product.stock, low_stock_threshold),
        }
    }
}

/// Customer attached to a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
}

impl From<&Customer> for CustomerRef {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
        }
    }
}

/// Discount as entered by the cashier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DiscountInput {
    /// Percentage points, 0 to 100
    Percent(Decimal),

    /// Minor units
    Fixed(u64),
}

impl DiscountInput {
    /// # Errors
    ///
    /// Returns an error if a fixed amount doesn't fit in signed minor units.
    pub fn to_request(self) -> Result<DiscountRequest<'static>, std::num::TryFromIntError> {
        Ok(match self {
            Self::Percent(points) => DiscountRequest::Percent(points),
            Self::Fixed(amount) => {
                DiscountRequest::Fixed(Money::from_minor(i64::try_from(amount)?, STORE_CURRENCY))
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub unit_price: i64,
    pub quantity: u32,

    /// Set for percentage discounts
    pub discount_percent: Option<Decimal>,

    pub discount: i64,
    pub total: i64,
}

impl CartLineView {
    /// # Errors
    ///
    /// Returns an error if the line can't be priced.
    pub fn new(line: &CartLine<'_>) -> Result<Self, fernwood::cart::CartError> {
        Ok(Self {
            product_id: line.product().clone(),
            name: line.name().to_string(),
            sku: line.sku().to_string(),
            unit_price: line.unit_price().to_minor_units(),
            quantity: line.quantity(),
            discount_percent: line.discount().percent_points(),
            discount: line.discount_amount()?.to_minor_units(),
            total: line.total()?.to_minor_units(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutView {
    /// `selecting_method`, `entering_amount`, `confirming`, `processing` or `settled`
    pub state: &'static str,
    pub method: Option<PaymentMethod>,
    pub total: i64,
    pub tendered: Option<i64>,
    pub change: Option<i64>,
}

impl CheckoutView {
    #[must_use]
    pub fn new(checkout: &Checkout<'_>) -> Self {
        let total = checkout.total();

        let (method, tendered) = match *checkout.state() {
            CheckoutState::Idle | CheckoutState::SelectingMethod => (None, None),
            CheckoutState::EnteringAmount { tendered } => (Some(PaymentMethod::Cash), tendered),
            CheckoutState::Confirming { method } => (Some(method), None),
            CheckoutState::Processing { method, tendered } => (Some(method), tendered),
            CheckoutState::Settled(settlement) => (Some(settlement.method), settlement.tendered),
        };

        Self {
            state: checkout.state().name(),
            method,
            total: total.to_minor_units(),
            tendered: tendered.map(|amount| amount.to_minor_units()),
            change: tendered
                .and_then(|amount| change_due(amount, total))
                .map(|change| change.to_minor_units()),
        }
    }
}

/// A register's cart with derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: i64,
    pub discount: i64,
    pub tax: i64,
    pub total: i64,

    /// Percentage points
    pub tax_rate: Decimal,

    pub customer: Option<CustomerRef>,
    pub checkout: Option<CheckoutView>,
}

impl CartView {
    /// # Errors
    ///
    /// Returns an error if the cart can't be priced.
    pub fn new(
        cart: &Cart<'_>,
        tax_rate: TaxRate,
        customer: Option<&CustomerRef>,
        checkout: Option<&Checkout<'_>>,
    ) -> Result<Self, PricingError> {
        let totals: CartTotals<'_> = fernwood::pricing::price_cart(cart, tax_rate)?;

        let lines = cart
            .iter()
            .map(CartLineView::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            item_count: totals.item_count,
            subtotal: totals.subtotal.to_minor_units(),
            discount: totals.discount.to_minor_units(),
            tax: totals.tax.to_minor_units(),
            total: totals.total.to_minor_units(),
            tax_rate: tax_rate.percent_points(),
            customer: customer.cloned(),
            checkout: checkout.map(CheckoutView::new),
        })
    }
}

/// Result of a settled payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub transaction: Transaction,

    /// Plain text receipt
    pub receipt: String,
}
