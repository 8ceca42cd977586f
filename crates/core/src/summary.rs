//! Cart summary

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, catalog::Catalog, delivery::DeliveryPolicy, products::ProductId};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A cart line refers to a product missing from the catalog.
    #[error("Missing product {0}")]
    MissingProduct(ProductId),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Derived totals for the current cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary<'a> {
    /// Number of units in the cart.
    pub item_count: u64,

    /// Sum of line prices.
    pub subtotal: Money<'a, Currency>,

    /// Delivery fee for the subtotal.
    pub delivery_fee: Money<'a, Currency>,

    /// Subtotal plus delivery fee.
    pub total: Money<'a, Currency>,

    /// Amount still needed for free delivery.
    pub remaining_for_free_delivery: Money<'a, Currency>,
}

impl<'a> CartSummary<'a> {
    /// Compute the summary of a cart against a catalog and delivery policy.
    pub fn new(cart: &Cart, catalog: &Catalog<'a>, policy: &DeliveryPolicy<'_>) -> Self {
        let subtotal = cart.subtotal(catalog);

        Self {
            item_count: cart.item_count(),
            subtotal,
            delivery_fee: policy.fee(&subtotal),
            total: policy.total(&subtotal),
            remaining_for_free_delivery: policy.remaining_for_free_delivery(&subtotal),
        }
    }

    /// Whether delivery is free for this cart.
    #[must_use]
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.to_minor_units() == 0
    }

    /// Prints the cart lines and totals as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if a line's product is missing or the output cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &Cart,
        catalog: &Catalog<'_>,
    ) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Serving", "Unit Price", "Qty", "Line Total"]);

        for (index, line) in cart.iter().enumerate() {
            let product = catalog
                .get(line.product())
                .ok_or(SummaryError::MissingProduct(line.product()))?;

            let unit_price = product.unit_price(line.serving());
            let line_total = Money::from_minor(
                unit_price
                    .to_minor_units()
                    .saturating_mul(i64::from(line.quantity())),
                unit_price.currency(),
            );

            builder.push_record([
                format!("#{:<3}", index + 1),
                product.name.clone(),
                line.serving().to_string(),
                format!("{unit_price}"),
                line.quantity().to_string(),
                format!("{line_total}"),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;

        self.write_totals(&mut out)
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let delivery = if self.has_free_delivery() {
            "Free".to_string()
        } else {
            format!("{}", self.delivery_fee)
        };

        let rows = [
            (" Items:", self.item_count.to_string()),
            (" Subtotal:", format!("{}", self.subtotal)),
            (" Delivery:", delivery),
            (" Total:", format!("{}", self.total)),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")
                .map_err(|_err| SummaryError::IO)?;
        }

        if !self.has_free_delivery() {
            writeln!(
                out,
                " Add {} more for free delivery.",
                self.remaining_for_free_delivery
            )
            .map_err(|_err| SummaryError::IO)?;
        }

        writeln!(out).map_err(|_err| SummaryError::IO)
    }
}
