//! Cart and favorites snapshots

use thiserror::Error;
use tracing::warn;

use crate::{
    cart::{Cart, CartLine},
    favorites::Favorites,
    products::ProductId,
};

use super::{CART_KEY, FAVORITES_KEY, KeyValueStore, StorageError};

/// Errors reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The store failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored bytes are not a valid snapshot
    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the cart lines as a JSON array.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn encode_cart(cart: &Cart) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(cart.lines())
}

/// Parse a cart snapshot, merging duplicate lines and dropping empty ones.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the bytes are not a cart snapshot.
pub fn decode_cart(bytes: &[u8]) -> Result<Cart, serde_json::Error> {
    let lines: Vec<CartLine> = serde_json::from_slice(bytes)?;

    Ok(Cart::from_lines(lines))
}

/// Serialize favorites as a sorted JSON array of ids.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn encode_favorites(favorites: &Favorites) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&favorites.sorted())
}

/// Parse a favorites snapshot.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the bytes are not a favorites snapshot.
pub fn decode_favorites(bytes: &[u8]) -> Result<Favorites, serde_json::Error> {
    let ids: Vec<ProductId> = serde_json::from_slice(bytes)?;

    Ok(ids.into_iter().collect())
}

fn load_snapshot<S, T>(
    store: &S,
    key: &str,
    decode: impl FnOnce(&[u8]) -> Result<T, serde_json::Error>,
) -> Result<Option<T>, SnapshotError>
where
    S: KeyValueStore + ?Sized,
{
    match store.load(key)? {
        Some(bytes) => Ok(Some(decode(&bytes)?)),
        None => Ok(None),
    }
}

/// Load the cart, falling back to an empty cart when it is missing or unreadable.
pub fn restore_cart<S: KeyValueStore + ?Sized>(store: &S) -> Cart {
    match load_snapshot(store, CART_KEY, decode_cart) {
        Ok(cart) => cart.unwrap_or_default(),
        Err(error) => {
            warn!(key = CART_KEY, %error, "discarding unreadable snapshot");

            Cart::default()
        }
    }
}

/// Load favorites, falling back to an empty set when missing or unreadable.
pub fn restore_favorites<S: KeyValueStore + ?Sized>(store: &S) -> Favorites {
    match load_snapshot(store, FAVORITES_KEY, decode_favorites) {
        Ok(favorites) => favorites.unwrap_or_default(),
        Err(error) => {
            warn!(key = FAVORITES_KEY, %error, "discarding unreadable snapshot");

            Favorites::default()
        }
    }
}

/// Write the cart snapshot.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if encoding or the store fails.
pub fn persist_cart<S: KeyValueStore + ?Sized>(
    store: &mut S,
    cart: &Cart,
) -> Result<(), SnapshotError> {
    store.save(CART_KEY, &encode_cart(cart)?)?;

    Ok(())
}

/// Write the favorites snapshot.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if encoding or the store fails.
pub fn persist_favorites<S: KeyValueStore + ?Sized>(
    store: &mut S,
    favorites: &Favorites,
) -> Result<(), SnapshotError> {
    store.save(FAVORITES_KEY, &encode_favorites(favorites)?)?;

    Ok(())
}
