//! Lasagna
//!
//! Catalog, cart and favorites state for a lasagna delivery storefront:
//! filtering, serving-size pricing, the free-delivery promotion and
//! client-local persistence.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod delivery;
pub mod favorites;
pub mod filters;
pub mod fixtures;
pub mod intents;
pub mod prelude;
pub mod products;
pub mod storage;
pub mod storefront;
pub mod summary;
pub mod tags;
pub mod utils;
