//! Receipt

use std::{fmt::Write, io};

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    checkout::Settlement,
    pricing::{CartTotals, PricingError, TaxRate, price_cart},
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line couldn't be priced.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart couldn't be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// How a receipt is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiptStyle {
    /// Plain text, safe for files and HTTP responses.
    #[default]
    Plain,

    /// ANSI colours for a terminal.
    Ansi,
}

/// One printed line of a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product name
    pub name: String,

    /// Product SKU
    pub sku: String,

    /// Units sold
    pub quantity: u32,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Discount taken off the line
    pub discount: Money<'a, Currency>,

    /// Line total after discount
    pub total: Money<'a, Currency>,
}

/// Final receipt for a settled sale.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 8]>,
    totals: CartTotals<'a>,
    tax_rate: TaxRate,
    settlement: Option<Settlement<'a>>,
}

impl<'a> Receipt<'a> {
    /// Create a receipt from already computed parts.
    #[must_use]
    pub fn new(
        lines: impl IntoIterator<Item = ReceiptLine<'a>>,
        totals: CartTotals<'a>,
        tax_rate: TaxRate,
        settlement: Option<Settlement<'a>>,
    ) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            totals,
            tax_rate,
            settlement,
        }
    }

    /// Build a receipt from the cart being paid for.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the cart can't be priced.
    pub fn from_cart(
        cart: &Cart<'a>,
        tax_rate: TaxRate,
        settlement: Option<Settlement<'a>>,
    ) -> Result<Self, ReceiptError> {
        let lines = cart
            .iter()
            .map(|line| -> Result<ReceiptLine<'a>, CartError> {
                Ok(ReceiptLine {
                    name: line.name().to_string(),
                    sku: line.sku().to_string(),
                    quantity: line.quantity(),
                    unit_price: line.unit_price(),
                    discount: line.discount_amount()?,
                    total: line.total()?,
                })
            })
            .collect::<Result<SmallVec<[_; 8]>, _>>()?;

        Ok(Self {
            lines,
            totals: price_cart(cart, tax_rate)?,
            tax_rate,
            settlement,
        })
    }

    /// Printed lines.
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Cart totals.
    pub fn totals(&self) -> &CartTotals<'a> {
        &self.totals
    }

    /// Payment details, once settled.
    pub fn settlement(&self) -> Option<&Settlement<'a>> {
        self.settlement.as_ref()
    }

    /// Writes the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        style: ReceiptStyle,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "SKU", "Qty", "Unit Price", "Discount", "Line Total"]);

        for line in &self.lines {
            let discount = if line.discount.to_minor_units() == 0 {
                String::new()
            } else {
                format!("-{}", line.discount)
            };

            builder.push_record([
                line.name.clone(),
                line.sku.clone(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                discount,
                format!("{}", line.total),
            ]);
        }

        write_receipt_table(&mut out, builder, style)?;
        write_receipt_summary(&mut out, self, style)?;

        Ok(())
    }

    /// Render the receipt to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(&self, style: ReceiptStyle) -> Result<String, ReceiptError> {
        let mut buffer = Vec::new();

        self.write_to(&mut buffer, style)?;

        String::from_utf8(buffer).map_err(|_err| ReceiptError::IO)
    }
}

fn write_receipt_table(
    out: &mut impl io::Write,
    builder: Builder,
    style: ReceiptStyle,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::new(2..6), Alignment::right());

    let table_str = match style {
        ReceiptStyle::Plain => table.to_string(),
        ReceiptStyle::Ansi => {
            table.modify(Rows::first(), Color::BOLD);
            table.modify(Columns::new(4..5), Color::FG_GREEN);

            colorize_borders(&table.to_string())
        }
    };

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    receipt: &Receipt<'_>,
    style: ReceiptStyle,
) -> Result<(), ReceiptError> {
    let totals = &receipt.totals;

    let mut rows: SmallVec<[(String, String); 8]> = SmallVec::new();

    rows.push(("Subtotal:".to_string(), format!("{}", totals.subtotal)));

    if totals.discount.to_minor_units() != 0 {
        rows.push(("Discount:".to_string(), format!("-{}", totals.discount)));
    }

    rows.push((
        format!("Tax ({}%):", receipt.tax_rate.percent_points()),
        format!("{}", totals.tax),
    ));

    let total_row = rows.len();

    rows.push(("Total:".to_string(), format!("{}", totals.total)));

    if let Some(settlement) = &receipt.settlement {
        rows.push(("Payment:".to_string(), settlement.method.to_string()));

        if let Some(tendered) = settlement.tendered {
            rows.push(("Tendered:".to_string(), format!("{tendered}")));
        }

        if let Some(change) = settlement.change {
            rows.push(("Change:".to_string(), format!("{change}")));
        }
    }

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

    for (position, (label, value)) in rows.iter().enumerate() {
        let line = format!(" {label:>label_width$}  {value:>value_width$}");

        let line = if style == ReceiptStyle::Ansi && position == total_row {
            format!("\x1b[1m{line}\x1b[0m")
        } else {
            line
        };

        writeln!(out, "{line}").map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
