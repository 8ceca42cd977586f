//! Cart

use std::mem;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    products::{Product, ProductId, Serving},
};

/// One distinct `(product, serving)` entry in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: ProductId,
    serving: Serving,
    quantity: u32,
}

impl CartLine {
    /// Creates a new line with the given quantity.
    ///
    /// Returns `None` for a zero quantity, since such a line cannot exist in a cart.
    #[must_use]
    pub fn new(product: ProductId, serving: Serving, quantity: u32) -> Option<Self> {
        (quantity > 0).then_some(Self {
            product,
            serving,
            quantity,
        })
    }

    /// Returns the product of the line
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Returns the selected serving
    pub fn serving(&self) -> Serving {
        self.serving
    }

    /// Returns the quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    fn matches(&self, product: ProductId, serving: Serving) -> bool {
        self.product == product && self.serving == serving
    }
}

/// What happened to a line after a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has the given quantity.
    Updated(u32),

    /// The quantity dropped to zero or below and the line was removed.
    Removed,

    /// No line exists at the given index.
    NoSuchLine,
}

/// Ordered list of cart lines, unique per `(product, serving)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from restored lines, merging duplicate `(product, serving)` pairs
    /// and skipping empty ones.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            cart.add_quantity(line.product, line.serving, line.quantity);
        }

        cart
    }

    /// Add one unit of a product in the given serving.
    ///
    /// Increments the existing line for the pair, or appends a new line with quantity 1.
    /// Products without price tiers are always filed under their own serving.
    /// Returns the index of the affected line.
    pub fn add(&mut self, product: &Product<'_>, serving: Serving) -> usize {
        self.add_quantity(product.id, product.cart_serving(serving), 1)
    }

    fn add_quantity(&mut self, product: ProductId, serving: Serving, quantity: u32) -> usize {
        if let Some((index, line)) = self
            .lines
            .iter_mut()
            .enumerate()
            .find(|(_, line)| line.matches(product, serving))
        {
            line.quantity = line.quantity.saturating_add(quantity);

            return index;
        }

        self.lines.push(CartLine {
            product,
            serving,
            quantity,
        });

        self.lines.len().saturating_sub(1)
    }

    /// Add `delta` to the quantity of the line at `index`.
    ///
    /// A resulting quantity of zero or less removes the line entirely.
    pub fn adjust_quantity(&mut self, index: usize, delta: i64) -> QuantityChange {
        let Some(line) = self.lines.get_mut(index) else {
            return QuantityChange::NoSuchLine;
        };

        let adjusted = i64::from(line.quantity).saturating_add(delta);

        if adjusted <= 0 {
            self.lines.remove(index);

            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);

        QuantityChange::Updated(line.quantity)
    }

    /// Remove the line at `index`, returning it.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Drop lines whose product is not in the catalog.
    ///
    /// Lines for single-size products are re-filed under the product's own
    /// serving, merging with any line that then has the same pair.
    /// Returns the number of dropped lines.
    pub fn retain_known(&mut self, catalog: &Catalog<'_>) -> usize {
        let mut dropped = 0_usize;

        for line in mem::take(&mut self.lines) {
            match catalog.get(line.product) {
                Some(product) => {
                    let serving = product.cart_serving(line.serving);

                    self.add_quantity(line.product, serving, line.quantity);
                }
                None => dropped = dropped.saturating_add(1),
            }
        }

        dropped
    }

    /// Get a line by index.
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Lines whose product is missing from the catalog contribute nothing.
    pub fn subtotal<'a>(&self, catalog: &Catalog<'a>) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .filter_map(|line| {
                catalog.get(line.product).map(|product| {
                    product
                        .unit_price(line.serving)
                        .to_minor_units()
                        .saturating_mul(i64::from(line.quantity))
                })
            })
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor, catalog.currency())
    }
}
