//! POS Handlers
//!
//! Every cart and checkout handler answers with the register's cart as it now stands.

use fernwood_app::domain::pos::models::{
    CartLineView, CartView, CatalogItem, CheckoutView, CustomerRef,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::extensions::*;

pub(crate) mod cart;
pub(crate) mod catalog;
pub(crate) mod checkout;
pub(crate) mod customer;
pub(crate) mod discount;
pub(crate) mod items;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogItemResponse {
    pub product_id: String,
    pub name: String,
    pub sku: String,

    /// Unit price in pesewas
    pub price: i64,

    pub stock: u32,
    pub status: String,
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            status: item.status.label(),
            name: item.name,
            sku: item.sku,
            price: item.price,
            stock: item.stock,
        }
    }
}

/// Cart line. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub unit_price: i64,
    pub quantity: u32,

    /// Percentage points, set for percentage discounts
    pub discount_percent: Option<String>,

    pub discount: i64,
    pub total: i64,
}

impl From<CartLineView> for CartLineResponse {
    fn from(line: CartLineView) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            discount_percent: line
                .discount_percent
                .map(|points| points.normalize().to_string()),
            name: line.name,
            sku: line.sku,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
            total: line.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerRefResponse {
    pub id: String,
    pub name: String,
}

impl From<CustomerRef> for CustomerRefResponse {
    fn from(customer: CustomerRef) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
        }
    }
}

/// Open checkout. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// `selecting_method`, `entering_amount`, `confirming`, `processing` or `settled`
    pub state: String,

    pub method: Option<String>,
    pub total: i64,
    pub tendered: Option<i64>,
    pub change: Option<i64>,
}

impl From<CheckoutView> for CheckoutResponse {
    fn from(checkout: CheckoutView) -> Self {
        Self {
            state: checkout.state.to_string(),
            method: checkout.method.map(|method| method.label()),
            total: checkout.total,
            tendered: checkout.tendered,
            change: checkout.change,
        }
    }
}

/// Register cart with derived totals. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub item_count: u64,
    pub subtotal: i64,
    pub discount: i64,
    pub tax: i64,
    pub total: i64,

    /// Percentage points
    pub tax_rate: String,

    pub customer: Option<CustomerRefResponse>,
    pub checkout: Option<CheckoutResponse>,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        Self {
            lines: cart.lines.into_iter().map(Into::into).collect(),
            item_count: cart.item_count,
            subtotal: cart.subtotal,
            discount: cart.discount,
            tax: cart.tax,
            total: cart.total,
            tax_rate: cart.tax_rate.normalize().to_string(),
            customer: cart.customer.map(Into::into),
            checkout: cart.checkout.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use fernwood::{checkout::PaymentMethod, products::ProductId};
    use fernwood_app::domain::pos::models::{CartLineView, CartView, CheckoutView};
    use rust_decimal::Decimal;

    /// One side table at 100.00 with 10% off, taxed at 15%.
    pub(super) fn make_cart() -> CartView {
        CartView {
            lines: vec![CartLineView {
                product_id: ProductId::from("PROD-000001"),
                name: "Side Table".to_string(),
                sku: "TBL-100".to_string(),
                unit_price: 10_000,
                quantity: 1,
                discount_percent: Some(Decimal::TEN),
                discount: 1_000,
                total: 9_000,
            }],
            item_count: 1,
            subtotal: 10_000,
            discount: 1_000,
            tax: 1_350,
            total: 10_350,
            tax_rate: Decimal::new(15, 0),
            customer: None,
            checkout: None,
        }
    }

    pub(super) fn make_checkout_cart(
        state: &'static str,
        method: Option<PaymentMethod>,
    ) -> CartView {
        CartView {
            checkout: Some(CheckoutView {
                state,
                method,
                total: 10_350,
                tendered: None,
                change: None,
            }),
            ..make_cart()
        }
    }
}
