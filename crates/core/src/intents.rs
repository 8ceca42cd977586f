//! Customer intents
//!
//! Everything the presentation layer can ask the storefront to do.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{CartLine, QuantityChange},
    checkout::CheckoutOutcome,
    filters::Facet,
    products::{ProductId, Serving},
};

/// A request emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent<'a> {
    /// The search box changed.
    SearchChanged(String),

    /// A facet value was clicked.
    FacetToggled(Facet),

    /// The price ceiling was set or cleared.
    MaxPriceSet(Option<Money<'a, Currency>>),

    /// All filters were reset.
    FiltersCleared,

    /// A serving was picked in a product card.
    ServingSelected {
        /// Product whose selector changed.
        product: ProductId,

        /// Picked serving.
        serving: Serving,
    },

    /// "Add to cart" was pressed.
    AddToCart {
        /// Product to add.
        product: ProductId,

        /// Serving to add; the remembered selection is used when `None`.
        serving: Option<Serving>,
    },

    /// A line's quantity was stepped.
    AdjustQuantity {
        /// Line index in the cart.
        line: usize,

        /// Quantity change, typically +1 or -1.
        delta: i64,
    },

    /// A line was removed outright.
    RemoveLine(usize),

    /// The cart was emptied.
    ClearCart,

    /// A product's favorite heart was clicked.
    ToggleFavorite(ProductId),

    /// The checkout button was pressed.
    Checkout,
}

/// What applying an intent changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The filter state was replaced.
    FilterChanged,

    /// A serving selection was remembered.
    ServingSelected,

    /// A unit was added to the line at this index.
    AddedToCart {
        /// Index of the affected line.
        line: usize,
    },

    /// A quantity adjustment was applied.
    QuantityChanged(QuantityChange),

    /// A line was removed, if it existed.
    LineRemoved(Option<CartLine>),

    /// The cart was emptied.
    CartCleared,

    /// A favorite was toggled.
    FavoriteToggled {
        /// Toggled product.
        product: ProductId,

        /// Membership after the toggle.
        is_favorite: bool,
    },

    /// Checkout was attempted.
    Checkout(CheckoutOutcome),
}
