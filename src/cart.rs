//! Cart

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    discounts::{
        Discount, DiscountError, DiscountRequest, DiscountScope, line_discount, split_fixed,
    },
    products::{Product, ProductId},
};

/// Errors related to cart mutation or line totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product has no stock at all.
    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    /// The requested quantity is above the stock ceiling.
    #[error("only {available} of {product} in stock")]
    StockCeiling {
        /// Product being added
        product: ProductId,
        /// Units on hand
        available: u32,
    },

    /// No line for this product.
    #[error("{0} is not in the cart")]
    LineNotFound(ProductId),

    /// Product or discount priced in another currency (found, cart).
    #[error("{0} is priced in {1}, but the cart is in {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Line arithmetic overflowed minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Discount validation or calculation failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this many units.
    Set(u32),

    /// Quantity dropped below one and the line was removed.
    Removed,
}

/// A single product entry in the cart.
#[derive(Debug, Clone)]
pub struct CartLine<'a> {
    product: ProductId,
    name: String,
    sku: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    discount: Discount<'a>,
}

impl<'a> CartLine<'a> {
    fn from_product(product: &Product<'a>) -> Self {
        Self {
            product: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            unit_price: product.price,
            quantity: 1,
            discount: Discount::None,
        }
    }

    /// Product this line is for.
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Product name captured when the line was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product SKU captured when the line was added.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Unit price captured when the line was added. Never re-read from the catalog.
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Units in the line, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Discount held by the line.
    pub fn discount(&self) -> &Discount<'a> {
        &self.discount
    }

    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the product doesn't fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }

    /// Effective discount for the line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal or discount can't be computed.
    pub fn discount_amount(&self) -> Result<Money<'a, Currency>, CartError> {
        Ok(line_discount(&self.discount, self.subtotal()?)?)
    }

    /// Subtotal less discount.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal or discount can't be computed.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let subtotal = self.subtotal()?;
        let discount = self.discount_amount()?;

        Ok(Money::from_minor(
            subtotal.to_minor_units() - discount.to_minor_units(),
            subtotal.currency(),
        ))
    }
}

/// Ordered cart lines keyed by product, one line per product.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line, or starts a new line at quantity one. Returns the new
    /// quantity. A rejected add leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`] when a new line is requested for a product with no stock.
    /// - [`CartError::StockCeiling`] when the increment would go over the stock.
    /// - [`CartError::CurrencyMismatch`] when the product is priced in another currency.
    pub fn add(&mut self, product: &Product<'a>) -> Result<u32, CartError> {
        self.ensure_currency(&product.name, product.price.currency())?;

        if let Some(line) = self.line_mut(&product.id) {
            let quantity = line.quantity.saturating_add(1);

            if quantity > product.stock {
                return Err(CartError::StockCeiling {
                    product: product.id.clone(),
                    available: product.stock,
                });
            }

            line.quantity = quantity;

            return Ok(quantity);
        }

        if product.stock < 1 {
            return Err(CartError::OutOfStock(product.id.clone()));
        }

        self.lines.push(CartLine::from_product(product));

        Ok(1)
    }

    /// Set the quantity of an existing line; anything below one removes it.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`] when there is no line for the product.
    /// - [`CartError::StockCeiling`] when `quantity` exceeds the product's stock.
    pub fn update_quantity(
        &mut self,
        product: &Product<'a>,
        quantity: u32,
    ) -> Result<QuantityChange, CartError> {
        let position = self
            .position(&product.id)
            .ok_or_else(|| CartError::LineNotFound(product.id.clone()))?;

        if quantity < 1 {
            self.lines.remove(position);

            return Ok(QuantityChange::Removed);
        }

        if quantity > product.stock {
            return Err(CartError::StockCeiling {
                product: product.id.clone(),
                available: product.stock,
            });
        }

        if let Some(line) = self.lines.get_mut(position) {
            line.quantity = quantity;
        }

        Ok(QuantityChange::Set(quantity))
    }

    /// Remove a line. Missing lines are not an error.
    pub fn remove(&mut self, product: &ProductId) -> Option<CartLine<'a>> {
        let position = self.position(product)?;

        Some(self.lines.remove(position))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Apply a discount to one line or the whole cart, replacing any previous discount.
    ///
    /// Cart-wide percentages apply the same rate to every line. Cart-wide fixed amounts are split
    /// evenly, each share capped at its line subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for invalid requests, unknown lines or currency mismatches. The cart
    /// is unchanged on error.
    pub fn apply_discount(
        &mut self,
        scope: &DiscountScope,
        request: DiscountRequest<'a>,
    ) -> Result<(), CartError> {
        if let DiscountRequest::Fixed(amount) = request {
            self.ensure_currency("discount", amount.currency())?;
        }

        let discount = request.validate()?;

        match scope {
            DiscountScope::Line(product) => {
                let line = self
                    .line_mut(product)
                    .ok_or_else(|| CartError::LineNotFound(product.clone()))?;

                line.discount = discount;
            }
            DiscountScope::Cart => {
                if let Discount::Fixed(amount) = discount {
                    let subtotals = self
                        .lines
                        .iter()
                        .map(CartLine::subtotal)
                        .collect::<Result<SmallVec<[_; 8]>, _>>()?;

                    let shares = split_fixed(amount, &subtotals)?;

                    for (line, share) in self.lines.iter_mut().zip(shares) {
                        line.discount = if share.to_minor_units() == 0 {
                            Discount::None
                        } else {
                            Discount::Fixed(share)
                        };
                    }
                } else {
                    for line in &mut self.lines {
                        line.discount = discount;
                    }
                }
            }
        }

        Ok(())
    }

    /// Clear the discount on one line or on every line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when a single line is targeted and missing.
    pub fn remove_discount(&mut self, scope: &DiscountScope) -> Result<(), CartError> {
        match scope {
            DiscountScope::Line(product) => {
                let line = self
                    .line_mut(product)
                    .ok_or_else(|| CartError::LineNotFound(product.clone()))?;

                line.discount = Discount::None;
            }
            DiscountScope::Cart => {
                for line in &mut self.lines {
                    line.discount = Discount::None;
                }
            }
        }

        Ok(())
    }

    /// Look up the line for a product.
    pub fn line(&self, product: &ProductId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| &line.product == product)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Iterate over the lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.product == product)
    }

    fn line_mut(&mut self, product: &ProductId) -> Option<&mut CartLine<'a>> {
        self.lines.iter_mut().find(|line| &line.product == product)
    }

    fn ensure_currency(&self, what: &str, currency: &Currency) -> Result<(), CartError> {
        if currency == self.currency {
            Ok(())
        } else {
            Err(CartError::CurrencyMismatch(
                what.to_string(),
                currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }
}
