//! Discount Handlers
//!
//! A discount targets one line when `product_id` is given, otherwise every line in the cart.

use fernwood::{discounts::DiscountScope, products::ProductId};

pub(crate) mod delete;
pub(crate) mod update;

fn scope(product_id: Option<String>) -> DiscountScope {
    product_id.map_or(DiscountScope::Cart, |id| {
        DiscountScope::Line(ProductId::from(id))
    })
}
