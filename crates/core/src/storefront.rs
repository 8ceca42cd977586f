//! Storefront session
//!
//! Ties the catalog, cart, favorites and filters together, persisting the
//! cart and favorites after every change.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartLine, QuantityChange},
    catalog::Catalog,
    checkout::{CheckoutGateway, CheckoutOutcome, PendingCheckout},
    delivery::DeliveryPolicy,
    favorites::Favorites,
    filters::{Facet, FilterState, visible_products},
    intents::{Intent, IntentOutcome},
    products::{Product, ProductId, Serving},
    storage::{
        CART_KEY, FAVORITES_KEY, KeyValueStore,
        snapshot::{persist_cart, persist_favorites, restore_cart, restore_favorites},
    },
    summary::CartSummary,
};

/// Errors surfaced by the storefront.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// The product id is not in the catalog.
    #[error("Unknown product {0}")]
    UnknownProduct(ProductId),
}

/// A single customer's storefront state.
#[derive(Debug)]
pub struct Storefront<'a, S: KeyValueStore, G: CheckoutGateway = PendingCheckout> {
    catalog: Catalog<'a>,
    delivery: DeliveryPolicy<'a>,
    cart: Cart,
    favorites: Favorites,
    filter: FilterState<'a>,
    selections: FxHashMap<ProductId, Serving>,
    store: S,
    gateway: G,
}

impl<'a, S: KeyValueStore> Storefront<'a, S> {
    /// Open a storefront, restoring the cart and favorites from `store`.
    ///
    /// Missing or unreadable snapshots start empty. Restored entries for
    /// products no longer in the catalog are dropped.
    pub fn open(catalog: Catalog<'a>, delivery: DeliveryPolicy<'a>, store: S) -> Self {
        let mut cart = restore_cart(&store);
        let mut favorites = restore_favorites(&store);

        let dropped_lines = cart.retain_known(&catalog);
        let dropped_favorites = favorites.retain_known(&catalog);

        if dropped_lines > 0 || dropped_favorites > 0 {
            warn!(
                dropped_lines,
                dropped_favorites, "dropped restored entries for unknown products"
            );
        }

        debug!(
            lines = cart.len(),
            favorites = favorites.len(),
            "opened storefront"
        );

        Self {
            catalog,
            delivery,
            cart,
            favorites,
            filter: FilterState::new(),
            selections: FxHashMap::default(),
            store,
            gateway: PendingCheckout,
        }
    }
}

impl<'a, S: KeyValueStore, G: CheckoutGateway> Storefront<'a, S, G> {
    /// Replace the checkout gateway.
    pub fn with_gateway<H: CheckoutGateway>(self, gateway: H) -> Storefront<'a, S, H> {
        Storefront {
            catalog: self.catalog,
            delivery: self.delivery,
            cart: self.cart,
            favorites: self.favorites,
            filter: self.filter,
            selections: self.selections,
            store: self.store,
            gateway,
        }
    }

    /// Apply a customer intent.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] when the intent names a
    /// product that is not in the catalog.
    pub fn apply(&mut self, intent: Intent<'a>) -> Result<IntentOutcome, StorefrontError> {
        debug!(?intent, "applying intent");

        let outcome = match intent {
            Intent::SearchChanged(term) => {
                self.set_search(term);
                IntentOutcome::FilterChanged
            }
            Intent::FacetToggled(facet) => {
                self.toggle_facet(facet);
                IntentOutcome::FilterChanged
            }
            Intent::MaxPriceSet(max_price) => {
                self.set_max_price(max_price);
                IntentOutcome::FilterChanged
            }
            Intent::FiltersCleared => {
                self.clear_filters();
                IntentOutcome::FilterChanged
            }
            Intent::ServingSelected { product, serving } => {
                self.select_serving(product, serving)?;
                IntentOutcome::ServingSelected
            }
            Intent::AddToCart { product, serving } => {
                let line = match serving {
                    Some(serving) => self.add_to_cart(product, serving)?,
                    None => self.add_selected_to_cart(product)?,
                };
                IntentOutcome::AddedToCart { line }
            }
            Intent::AdjustQuantity { line, delta } => {
                IntentOutcome::QuantityChanged(self.adjust_quantity(line, delta))
            }
            Intent::RemoveLine(line) => IntentOutcome::LineRemoved(self.remove_line(line)),
            Intent::ClearCart => {
                self.clear_cart();
                IntentOutcome::CartCleared
            }
            Intent::ToggleFavorite(product) => IntentOutcome::FavoriteToggled {
                product,
                is_favorite: self.toggle_favorite(product)?,
            },
            Intent::Checkout => IntentOutcome::Checkout(self.checkout()),
        };

        Ok(outcome)
    }

    /// Replace the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter = self.filter.with_search(term);
    }

    /// Toggle a facet value.
    pub fn toggle_facet(&mut self, facet: Facet) {
        self.filter = self.filter.with_facet_toggled(facet);
    }

    /// Set or clear the price ceiling.
    pub fn set_max_price(&mut self, max_price: Option<Money<'a, Currency>>) {
        self.filter = self.filter.with_max_price(max_price);
    }

    /// Reset search, facets and price ceiling.
    pub fn clear_filters(&mut self) {
        self.filter = self.filter.cleared();
    }

    /// Remember the serving picked for a product.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] for ids missing from the catalog.
    pub fn select_serving(
        &mut self,
        product: ProductId,
        serving: Serving,
    ) -> Result<(), StorefrontError> {
        self.product(product)?;
        self.selections.insert(product, serving);

        Ok(())
    }

    /// Serving "add to cart" uses for a product.
    ///
    /// The picked serving, `individual` when none was picked. Products without
    /// price tiers always report their own serving.
    pub fn selected_serving(&self, product: ProductId) -> Serving {
        let picked = self.selections.get(&product).copied().unwrap_or_default();

        self.catalog
            .get(product)
            .map_or(picked, |item| item.cart_serving(picked))
    }

    /// Add one unit of a product in the given serving, returning the line index.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] for ids missing from the catalog.
    pub fn add_to_cart(
        &mut self,
        product: ProductId,
        serving: Serving,
    ) -> Result<usize, StorefrontError> {
        let item = self
            .catalog
            .get(product)
            .ok_or(StorefrontError::UnknownProduct(product))?;

        let line = self.cart.add(item, serving);

        self.save_cart();

        Ok(line)
    }

    /// Add one unit of a product in its remembered serving.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] for ids missing from the catalog.
    pub fn add_selected_to_cart(&mut self, product: ProductId) -> Result<usize, StorefrontError> {
        self.add_to_cart(product, self.selected_serving(product))
    }

    /// Add `delta` to a line's quantity; the line disappears at zero or below.
    pub fn adjust_quantity(&mut self, line: usize, delta: i64) -> QuantityChange {
        let change = self.cart.adjust_quantity(line, delta);

        if change != QuantityChange::NoSuchLine {
            self.save_cart();
        }

        change
    }

    /// Remove a cart line.
    pub fn remove_line(&mut self, line: usize) -> Option<CartLine> {
        let removed = self.cart.remove_line(line);

        if removed.is_some() {
            self.save_cart();
        }

        removed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.save_cart();
    }

    /// Toggle a product's favorite status, returning the new membership.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] for ids missing from the catalog.
    pub fn toggle_favorite(&mut self, product: ProductId) -> Result<bool, StorefrontError> {
        self.product(product)?;

        let is_favorite = self.favorites.toggle(product);

        self.save_favorites();

        Ok(is_favorite)
    }

    /// Ask the checkout gateway to handle the cart. Never changes cart or favorites.
    pub fn checkout(&self) -> CheckoutOutcome {
        self.gateway.checkout(&self.summary())
    }

    /// Products passing the current filter, in catalog order.
    pub fn visible_products(&self) -> Vec<&Product<'a>> {
        visible_products(&self.catalog, &self.filter)
    }

    /// Favorite products, in catalog order.
    pub fn favorite_products(&self) -> Vec<&Product<'a>> {
        self.catalog
            .iter()
            .filter(|product| self.favorites.contains(product.id))
            .collect()
    }

    /// Whether a product is a favorite.
    pub fn is_favorite(&self, product: ProductId) -> bool {
        self.favorites.contains(product)
    }

    /// Subtotal, delivery fee and total for the cart.
    pub fn summary(&self) -> CartSummary<'a> {
        CartSummary::new(&self.cart, &self.catalog, &self.delivery)
    }

    /// Cart lines paired with their products.
    pub fn cart_lines(&self) -> impl Iterator<Item = (&CartLine, &Product<'a>)> {
        self.cart.iter().filter_map(|line| {
            self.catalog
                .get(line.product())
                .map(|product| (line, product))
        })
    }

    /// Catalog
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Delivery policy
    pub fn delivery(&self) -> &DeliveryPolicy<'a> {
        &self.delivery
    }

    /// Cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Favorites
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Current filter state
    pub fn filter(&self) -> &FilterState<'a> {
        &self.filter
    }

    /// Persistence adapter
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the storefront, returning its persistence adapter.
    pub fn into_store(self) -> S {
        self.store
    }

    fn product(&self, product: ProductId) -> Result<&Product<'a>, StorefrontError> {
        self.catalog
            .get(product)
            .ok_or(StorefrontError::UnknownProduct(product))
    }

    fn save_cart(&mut self) {
        if let Err(error) = persist_cart(&mut self.store, &self.cart) {
            warn!(key = CART_KEY, %error, "failed to save snapshot");
        }
    }

    fn save_favorites(&mut self) {
        if let Err(error) = persist_favorites(&mut self.store, &self.favorites) {
            warn!(key = FAVORITES_KEY, %error, "failed to save snapshot");
        }
    }
}
