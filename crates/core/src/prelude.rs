//! Lasagna prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, QuantityChange},
    catalog::{Catalog, CatalogError},
    checkout::{CheckoutGateway, CheckoutOutcome, PendingCheckout},
    delivery::DeliveryPolicy,
    favorites::Favorites,
    filters::{Facet, FacetSet, FilterState, visible_products},
    fixtures::{FixtureError, LoadedCatalog, bundled_catalog, load_catalog, load_catalog_file},
    intents::{Intent, IntentOutcome},
    products::{Product, ProductId, Serving, ServingPrices, WeightClass},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
    storefront::{Storefront, StorefrontError},
    summary::{CartSummary, SummaryError},
    tags::Tags,
};
