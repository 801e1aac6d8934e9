//! Fernwood prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, QuantityChange},
    catalog::{Catalog, CatalogError},
    checkout::{Checkout, CheckoutError, CheckoutState, PaymentMethod, Settlement, change_due},
    discounts::{Discount, DiscountError, DiscountRequest, DiscountScope},
    fixtures::{Fixture, FixtureError},
    money::{AmountError, STORE_CURRENCY, parse_amount},
    pricing::{CartTotals, PricingError, TaxRate, price_cart},
    products::{DEFAULT_LOW_STOCK_THRESHOLD, Product, ProductId, StockStatus},
    receipt::{Receipt, ReceiptError, ReceiptLine, ReceiptStyle},
};
