//! Favorites

use rustc_hash::FxHashSet;

use crate::{catalog::Catalog, products::ProductId};

/// Set of favorite product ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: FxHashSet<ProductId>,
}

impl Favorites {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`, returning whether it is now a favorite.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Check membership.
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Drop ids that are not in the catalog, returning how many were dropped.
    pub fn retain_known(&mut self, catalog: &Catalog<'_>) -> usize {
        let before = self.ids.len();

        self.ids.retain(|id| catalog.contains(*id));

        before.saturating_sub(self.ids.len())
    }

    /// Ids in ascending order, for stable snapshots and display.
    pub fn sorted(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.ids.iter().copied().collect();

        ids.sort_unstable();

        ids
    }

    /// Iterate over the ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ProductId> for Favorites {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = Favorites::new();

        assert!(favorites.toggle(ProductId(2)));
        assert!(favorites.contains(ProductId(2)));

        assert!(!favorites.toggle(ProductId(2)));
        assert!(!favorites.contains(ProductId(2)));
    }

    #[test]
    fn double_toggle_restores_membership() {
        let original: Favorites = [ProductId(1), ProductId(3)].into_iter().collect();

        for id in [ProductId(1), ProductId(2)] {
            let mut favorites = original.clone();

            favorites.toggle(id);
            favorites.toggle(id);

            assert_eq!(favorites, original);
        }
    }

    #[test]
    fn sorted_is_ascending() {
        let favorites: Favorites = [ProductId(3), ProductId(1), ProductId(2)]
            .into_iter()
            .collect();

        assert_eq!(
            favorites.sorted(),
            vec![ProductId(1), ProductId(2), ProductId(3)]
        );
    }
}
