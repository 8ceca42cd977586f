//! Catalog filtering
//!
//! Filter state is an immutable value: every change produces a new
//! [`FilterState`], which replaces the previous one.

use std::collections::BTreeSet;

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    products::{Product, Serving, WeightClass},
};

/// Immutable set of accepted values for one facet.
///
/// An empty set places no restriction on the facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSet<T: Ord> {
    values: BTreeSet<T>,
}

impl<T: Ord> Default for FacetSet<T> {
    fn default() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Clone> FacetSet<T> {
    /// A copy of this set with `value` added if absent, or removed if present.
    #[must_use]
    pub fn toggled(&self, value: T) -> Self {
        let mut values = self.values.clone();

        if !values.remove(&value) {
            values.insert(value);
        }

        Self { values }
    }

    /// Whether a product with this facet value passes the facet.
    pub fn admits(&self, value: &T) -> bool {
        self.values.is_empty() || self.values.contains(value)
    }

    /// Whether `value` is explicitly selected.
    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    /// Selected values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    /// Check if no value is selected.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Ord> FromIterator<T> for FacetSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A single facet value, as toggled by the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    /// Serving type.
    Serving(Serving),

    /// Weight class.
    Weight(WeightClass),

    /// Product line.
    Line(String),
}

/// Search term, facet selections and price ceiling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState<'a> {
    search: String,
    servings: FacetSet<Serving>,
    weights: FacetSet<WeightClass>,
    lines: FacetSet<String>,
    max_price: Option<Money<'a, Currency>>,
}

impl<'a> FilterState<'a> {
    /// Unrestricted filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search term.
    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    /// Toggle a facet value.
    #[must_use]
    pub fn with_facet_toggled(&self, facet: Facet) -> Self {
        match facet {
            Facet::Serving(serving) => self.with_serving_toggled(serving),
            Facet::Weight(weight) => self.with_weight_toggled(weight),
            Facet::Line(line) => self.with_line_toggled(line),
        }
    }

    /// Toggle a serving type.
    #[must_use]
    pub fn with_serving_toggled(&self, serving: Serving) -> Self {
        Self {
            servings: self.servings.toggled(serving),
            ..self.clone()
        }
    }

    /// Toggle a weight class.
    #[must_use]
    pub fn with_weight_toggled(&self, weight: WeightClass) -> Self {
        Self {
            weights: self.weights.toggled(weight),
            ..self.clone()
        }
    }

    /// Toggle a product line.
    #[must_use]
    pub fn with_line_toggled(&self, line: impl Into<String>) -> Self {
        Self {
            lines: self.lines.toggled(line.into()),
            ..self.clone()
        }
    }

    /// Set or clear the price ceiling.
    #[must_use]
    pub fn with_max_price(&self, max_price: Option<Money<'a, Currency>>) -> Self {
        Self {
            max_price,
            ..self.clone()
        }
    }

    /// Unrestricted filter.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Selected serving types.
    pub fn servings(&self) -> &FacetSet<Serving> {
        &self.servings
    }

    /// Selected weight classes.
    pub fn weights(&self) -> &FacetSet<WeightClass> {
        &self.weights
    }

    /// Selected product lines.
    pub fn lines(&self) -> &FacetSet<String> {
        &self.lines
    }

    /// Price ceiling, if any.
    pub fn max_price(&self) -> Option<Money<'a, Currency>> {
        self.max_price
    }

    /// Check whether nothing restricts the catalog.
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty()
            && self.servings.is_empty()
            && self.weights.is_empty()
            && self.lines.is_empty()
            && self.max_price.is_none()
    }

    /// Whether a single product passes every criterion.
    pub fn admits(&self, product: &Product<'_>) -> bool {
        product.matches_search(&self.search)
            && self.servings.admits(&product.serving)
            && self.weights.admits(&product.weight)
            && self.lines.admits(&product.line)
            && self.max_price.is_none_or(|ceiling| {
                product.price.to_minor_units() <= ceiling.to_minor_units()
            })
    }
}

/// Products passing the filter, in catalog order.
pub fn visible_products<'c, 'a>(
    catalog: &'c Catalog<'a>,
    filter: &FilterState<'_>,
) -> Vec<&'c Product<'a>> {
    catalog
        .iter()
        .filter(|product| filter.admits(product))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PEN;
    use testresult::TestResult;

    use crate::{products::ProductId, tags::Tags};

    use super::*;

    fn product<'a>(
        id: u32,
        name: &str,
        tags: &[&str],
        serving: Serving,
        weight: WeightClass,
        line: &str,
        minor: i64,
    ) -> Product<'a> {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            description: String::new(),
            image: String::new(),
            price: Money::from_minor(minor, PEN),
            previous_price: None,
            weight,
            serving,
            line: line.to_string(),
            tags: Tags::from_strs(tags),
            serving_prices: None,
        }
    }

    fn test_catalog<'a>() -> Result<Catalog<'a>, crate::catalog::CatalogError> {
        Catalog::new([
            product(
                1,
                "Lasaña Clásica",
                &["clasica", "carne"],
                Serving::Individual,
                WeightClass::Grams500,
                "clasica",
                12_00,
            ),
            product(
                2,
                "Lasaña de Pollo",
                &["pollo"],
                Serving::Familiar,
                WeightClass::Grams1000,
                "clasica",
                45_00,
            ),
            product(
                3,
                "Lasaña Vegetariana",
                &["vegetariana", "verduras"],
                Serving::Bandeja,
                WeightClass::Grams750,
                "gourmet",
                95_00,
            ),
        ])
    }

    fn ids(products: &[&Product<'_>]) -> Vec<u32> {
        products.iter().map(|product| product.id.0).collect()
    }

    #[test]
    fn unrestricted_filter_keeps_catalog_order() -> TestResult {
        let catalog = test_catalog()?;

        let visible = visible_products(&catalog, &FilterState::new());

        assert_eq!(ids(&visible), vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn search_matches_name_or_tag_ignoring_case() -> TestResult {
        let catalog = test_catalog()?;

        let by_name = visible_products(&catalog, &FilterState::new().with_search("POLLO"));
        let by_tag = visible_products(&catalog, &FilterState::new().with_search("verdu"));
        let everything = visible_products(&catalog, &FilterState::new().with_search("lasaña"));

        assert_eq!(ids(&by_name), vec![2]);
        assert_eq!(ids(&by_tag), vec![3]);
        assert_eq!(ids(&everything), vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn search_without_match_is_empty() -> TestResult {
        let catalog = test_catalog()?;

        let visible = visible_products(&catalog, &FilterState::new().with_search("xyz-no-match"));

        assert!(visible.is_empty());

        Ok(())
    }

    #[test]
    fn search_term_is_not_trimmed() -> TestResult {
        let catalog = test_catalog()?;

        let padded = visible_products(&catalog, &FilterState::new().with_search("pollo "));
        let blank = visible_products(&catalog, &FilterState::new().with_search("   "));

        assert!(padded.is_empty());
        assert!(blank.is_empty());

        Ok(())
    }

    #[test]
    fn facets_restrict_to_members() -> TestResult {
        let catalog = test_catalog()?;

        let filter = FilterState::new()
            .with_facet_toggled(Facet::Serving(Serving::Individual))
            .with_facet_toggled(Facet::Serving(Serving::Bandeja));

        assert_eq!(ids(&visible_products(&catalog, &filter)), vec![1, 3]);

        let filter = filter.with_facet_toggled(Facet::Line("gourmet".to_string()));

        assert_eq!(ids(&visible_products(&catalog, &filter)), vec![3]);

        let filter = FilterState::new().with_facet_toggled(Facet::Weight(WeightClass::Grams1000));

        assert_eq!(ids(&visible_products(&catalog, &filter)), vec![2]);

        Ok(())
    }

    #[test]
    fn toggling_facet_twice_clears_restriction() -> TestResult {
        let catalog = test_catalog()?;
        let original = FilterState::new();

        let filter = original
            .with_facet_toggled(Facet::Weight(WeightClass::Grams500))
            .with_facet_toggled(Facet::Weight(WeightClass::Grams500));

        assert_eq!(filter, original);
        assert_eq!(ids(&visible_products(&catalog, &filter)), vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn toggling_returns_new_value_and_leaves_original() {
        let original = FilterState::new();

        let toggled = original.with_facet_toggled(Facet::Serving(Serving::Familiar));

        assert!(original.servings().is_empty());
        assert!(toggled.servings().contains(&Serving::Familiar));
    }

    #[test]
    fn max_price_is_inclusive() -> TestResult {
        let catalog = test_catalog()?;

        let filter = FilterState::new().with_max_price(Some(Money::from_minor(45_00, PEN)));

        assert_eq!(ids(&visible_products(&catalog, &filter)), vec![1, 2]);
        assert_eq!(
            ids(&visible_products(&catalog, &filter.with_max_price(None))),
            vec![1, 2, 3]
        );

        Ok(())
    }

    #[test]
    fn empty_facet_set_admits_everything() {
        let facets: FacetSet<WeightClass> = FacetSet::default();

        assert!(
            WeightClass::ALL
                .iter()
                .all(|weight| facets.admits(weight))
        );
    }

    #[test]
    fn cleared_resets_every_criterion() -> TestResult {
        let catalog = test_catalog()?;

        let filter = FilterState::new()
            .with_search("pollo")
            .with_line_toggled("gourmet")
            .with_max_price(Some(Money::from_minor(10_00, PEN)));

        assert!(visible_products(&catalog, &filter).is_empty());

        let cleared = filter.cleared();

        assert!(cleared.is_unrestricted());
        assert_eq!(ids(&visible_products(&catalog, &cleared)), vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn is_unrestricted() {
        assert!(FilterState::new().is_unrestricted());
        assert!(!FilterState::new().with_search("  ").is_unrestricted());
        assert!(!FilterState::new().with_search("pollo").is_unrestricted());
    }
}
