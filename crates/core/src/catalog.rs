//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no products, so its currency cannot be determined.
    #[error("Catalog has no products")]
    Empty,

    /// Two products share an id.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A shelf or tier price is zero or negative.
    #[error("Product {0} has a non-positive price")]
    NonPositivePrice(ProductId),

    /// A price uses a different currency than the rest of the catalog (product, found, expected).
    #[error("Product {0} is priced in {1}, but the catalog uses {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Immutable, ordered product catalog.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Validate and index the given products, keeping their order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`]: no products were given.
    /// - [`CatalogError::DuplicateId`]: two products share an id.
    /// - [`CatalogError::NonPositivePrice`]: a shelf, previous or tier price is not positive.
    /// - [`CatalogError::CurrencyMismatch`]: prices use more than one currency.
    pub fn new(products: impl Into<Vec<Product<'a>>>) -> Result<Self, CatalogError> {
        let products = products.into();

        let currency = products
            .first()
            .map(|product| product.price.currency())
            .ok_or(CatalogError::Empty)?;

        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            validate_prices(product, currency)?;

            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product<'a>> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Check whether a product id exists.
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty. Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every price in the catalog uses.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Distinct product lines, in order of first appearance.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = Vec::new();

        for product in &self.products {
            if !lines.contains(&product.line.as_str()) {
                lines.push(product.line.as_str());
            }
        }

        lines
    }
}

fn validate_prices(product: &Product<'_>, currency: &Currency) -> Result<(), CatalogError> {
    let tier_prices = product
        .serving_prices
        .iter()
        .flat_map(|prices| prices.iter().map(|(_, price)| price));

    let prices = std::iter::once(product.price)
        .chain(product.previous_price)
        .chain(tier_prices);

    for price in prices {
        if price.currency() != currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id,
                price.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        if price.to_minor_units() <= 0 {
            return Err(CatalogError::NonPositivePrice(product.id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{PEN, USD},
    };
    use testresult::TestResult;

    use crate::{
        products::{Serving, ServingPrices, WeightClass},
        tags::Tags,
    };

    use super::*;

    fn product<'a>(id: u32, minor: i64, currency: &'a Currency) -> Product<'a> {
        Product {
            id: ProductId(id),
            name: format!("Lasaña {id}"),
            description: String::new(),
            image: String::new(),
            price: Money::from_minor(minor, currency),
            previous_price: None,
            weight: WeightClass::Grams750,
            serving: Serving::Familiar,
            line: (if id % 2 == 0 { "gourmet" } else { "clasica" }).to_string(),
            tags: Tags::default(),
            serving_prices: None,
        }
    }

    #[test]
    fn new_keeps_order_and_indexes_ids() -> TestResult {
        let catalog = Catalog::new([product(3, 11_00, PEN), product(1, 12_00, PEN)])?;

        let ids: Vec<ProductId> = catalog.iter().map(|product| product.id).collect();

        assert_eq!(ids, vec![ProductId(3), ProductId(1)]);
        assert_eq!(
            catalog.get(ProductId(1)).map(|product| product.price),
            Some(Money::from_minor(12_00, PEN))
        );
        assert!(catalog.get(ProductId(2)).is_none());
        assert_eq!(catalog.currency(), PEN);
        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn new_rejects_empty_catalog() {
        let result = Catalog::new(Vec::<Product<'_>>::new());

        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Catalog::new([product(1, 12_00, PEN), product(1, 14_00, PEN)]);

        assert!(matches!(result, Err(CatalogError::DuplicateId(ProductId(1)))));
    }

    #[test]
    fn new_rejects_non_positive_prices() {
        let result = Catalog::new([product(1, 0, PEN)]);

        assert!(matches!(
            result,
            Err(CatalogError::NonPositivePrice(ProductId(1)))
        ));
    }

    #[test]
    fn new_rejects_tier_in_other_currency() {
        let tiered = Product {
            serving_prices: Some(ServingPrices {
                individual: Money::from_minor(12_00, PEN),
                familiar: Money::from_minor(40_00, USD),
                bandeja: Money::from_minor(100_00, PEN),
            }),
            ..product(1, 12_00, PEN)
        };

        let result = Catalog::new([tiered]);

        match result {
            Err(CatalogError::CurrencyMismatch(id, found, expected)) => {
                assert_eq!(id, ProductId(1));
                assert_eq!(found, USD.iso_alpha_code);
                assert_eq!(expected, PEN.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn lines_are_distinct_in_catalog_order() -> TestResult {
        let catalog = Catalog::new([
            product(1, 12_00, PEN),
            product(2, 14_00, PEN),
            product(3, 11_00, PEN),
        ])?;

        assert_eq!(catalog.lines(), vec!["clasica", "gourmet"]);

        Ok(())
    }
}
