//! Products

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tags::Tags;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors parsing product attributes from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductAttributeError {
    /// Serving name is not one of `individual`, `familiar` or `bandeja`.
    #[error("Unknown serving: {0}")]
    UnknownServing(String),

    /// Weight is not one of 500, 750 or 1000 grams.
    #[error("Unsupported weight class: {0}g")]
    UnknownWeight(u16),
}

/// Serving size.
///
/// A product's serving is its "type" facet; a cart line's serving is the
/// size the customer picked when adding it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Serving {
    /// Single portion.
    #[default]
    Individual,

    /// Family-sized dish.
    Familiar,

    /// Party tray.
    Bandeja,
}

impl Serving {
    /// All servings in display order.
    pub const ALL: [Serving; 3] = [Serving::Individual, Serving::Familiar, Serving::Bandeja];

    /// Lowercase name used in fixtures, snapshots and CLI arguments.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Serving::Individual => "individual",
            Serving::Familiar => "familiar",
            Serving::Bandeja => "bandeja",
        }
    }
}

impl fmt::Display for Serving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Serving {
    type Err = ProductAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        Serving::ALL
            .into_iter()
            .find(|serving| serving.as_str() == normalized)
            .ok_or_else(|| ProductAttributeError::UnknownServing(s.to_string()))
    }
}

/// Weight class of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeightClass {
    /// 500 grams.
    Grams500,

    /// 750 grams.
    Grams750,

    /// 1000 grams.
    Grams1000,
}

impl WeightClass {
    /// All weight classes, lightest first.
    pub const ALL: [WeightClass; 3] = [
        WeightClass::Grams500,
        WeightClass::Grams750,
        WeightClass::Grams1000,
    ];

    /// Weight in grams.
    #[must_use]
    pub fn grams(self) -> u16 {
        match self {
            WeightClass::Grams500 => 500,
            WeightClass::Grams750 => 750,
            WeightClass::Grams1000 => 1000,
        }
    }
}

impl TryFrom<u16> for WeightClass {
    type Error = ProductAttributeError;

    fn try_from(grams: u16) -> Result<Self, Self::Error> {
        WeightClass::ALL
            .into_iter()
            .find(|weight| weight.grams() == grams)
            .ok_or(ProductAttributeError::UnknownWeight(grams))
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.grams())
    }
}

/// Per-serving price tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServingPrices<'a> {
    /// Price of a single portion.
    pub individual: Money<'a, Currency>,

    /// Price of a family-sized dish.
    pub familiar: Money<'a, Currency>,

    /// Price of a party tray.
    pub bandeja: Money<'a, Currency>,
}

impl<'a> ServingPrices<'a> {
    /// Price for the given serving.
    #[must_use]
    pub fn get(&self, serving: Serving) -> Money<'a, Currency> {
        match serving {
            Serving::Individual => self.individual,
            Serving::Familiar => self.familiar,
            Serving::Bandeja => self.bandeja,
        }
    }

    /// Iterate over `(serving, price)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Serving, Money<'a, Currency>)> + '_ {
        Serving::ALL
            .into_iter()
            .map(move |serving| (serving, self.get(serving)))
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Short description shown under the name
    pub description: String,

    /// Image URI
    pub image: String,

    /// Shelf price
    pub price: Money<'a, Currency>,

    /// Price before the current promotion, if any
    pub previous_price: Option<Money<'a, Currency>>,

    /// Weight class
    pub weight: WeightClass,

    /// Serving type
    pub serving: Serving,

    /// Product line, e.g. "clasica" or "gourmet"
    pub line: String,

    /// Search tags
    pub tags: Tags,

    /// Serving-dependent prices, when the product is sold in several sizes
    pub serving_prices: Option<ServingPrices<'a>>,
}

impl<'a> Product<'a> {
    /// Unit price for a serving.
    ///
    /// Falls back to the shelf price for products without price tiers.
    #[must_use]
    pub fn unit_price(&self, serving: Serving) -> Money<'a, Currency> {
        self.serving_prices
            .map_or(self.price, |prices| prices.get(serving))
    }

    /// Serving a cart line for this product is filed under.
    ///
    /// Products without price tiers come in a single serving, their own.
    #[must_use]
    pub fn cart_serving(&self, requested: Serving) -> Serving {
        if self.serving_prices.is_some() {
            requested
        } else {
            self.serving
        }
    }

    /// Amount saved against the previous price.
    ///
    /// Returns `None` when there is no previous price or it is not higher than
    /// the current one.
    #[must_use]
    pub fn savings(&self) -> Option<Money<'a, Currency>> {
        let previous = self.previous_price?;
        let saved = previous
            .to_minor_units()
            .saturating_sub(self.price.to_minor_units());

        (saved > 0).then(|| Money::from_minor(saved, self.price.currency()))
    }

    /// Whether the product name or any tag contains the search term, ignoring case.
    ///
    /// An empty term matches every product.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();

        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.tags.any_contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PEN;
    use testresult::TestResult;

    use super::*;

    fn lasagna<'a>() -> Product<'a> {
        Product {
            id: ProductId(1),
            name: "Lasaña Clásica".to_string(),
            description: "Carne de res con salsa bechamel y tomate.".to_string(),
            image: "https://example.com/clasica.jpeg".to_string(),
            price: Money::from_minor(12_00, PEN),
            previous_price: None,
            weight: WeightClass::Grams500,
            serving: Serving::Individual,
            line: "clasica".to_string(),
            tags: Tags::from_strs(&["Carne", "clasica"]),
            serving_prices: None,
        }
    }

    #[test]
    fn serving_parses_case_insensitively() -> TestResult {
        assert_eq!("Familiar".parse::<Serving>()?, Serving::Familiar);
        assert_eq!(" bandeja ".parse::<Serving>()?, Serving::Bandeja);

        Ok(())
    }

    #[test]
    fn serving_rejects_unknown_name() {
        let result = "mediana".parse::<Serving>();

        assert_eq!(
            result,
            Err(ProductAttributeError::UnknownServing("mediana".to_string()))
        );
    }

    #[test]
    fn weight_class_from_grams() -> TestResult {
        assert_eq!(WeightClass::try_from(750)?, WeightClass::Grams750);
        assert!(WeightClass::try_from(600).is_err());

        Ok(())
    }

    #[test]
    fn unit_price_without_tiers_uses_shelf_price() {
        let product = lasagna();

        assert_eq!(
            product.unit_price(Serving::Bandeja),
            Money::from_minor(12_00, PEN)
        );
    }

    #[test]
    fn unit_price_with_tiers_uses_serving_price() {
        let product = Product {
            serving_prices: Some(ServingPrices {
                individual: Money::from_minor(12_00, PEN),
                familiar: Money::from_minor(40_00, PEN),
                bandeja: Money::from_minor(100_00, PEN),
            }),
            ..lasagna()
        };

        assert_eq!(
            product.unit_price(Serving::Familiar),
            Money::from_minor(40_00, PEN)
        );
        assert_eq!(
            product.unit_price(Serving::Bandeja),
            Money::from_minor(100_00, PEN)
        );
    }

    #[test]
    fn savings_only_when_previous_price_is_higher() {
        let discounted = Product {
            previous_price: Some(Money::from_minor(15_00, PEN)),
            ..lasagna()
        };
        let raised = Product {
            previous_price: Some(Money::from_minor(10_00, PEN)),
            ..lasagna()
        };

        assert_eq!(discounted.savings(), Some(Money::from_minor(3_00, PEN)));
        assert_eq!(raised.savings(), None);
        assert_eq!(lasagna().savings(), None);
    }

    #[test]
    fn matches_search_on_name_and_tags() {
        let product = lasagna();

        assert!(product.matches_search(""));
        assert!(product.matches_search("CLÁSICA"));
        assert!(product.matches_search("carn"));
        assert!(!product.matches_search("pollo"));
    }

    #[test]
    fn matches_search_keeps_surrounding_whitespace() {
        let product = lasagna();

        assert!(product.matches_search("lasaña "));
        assert!(product.matches_search(" clásica"));
        assert!(!product.matches_search("carne "));
        assert!(!product.matches_search("   "));
    }

    #[test]
    fn cart_serving_follows_price_tiers() {
        let single = lasagna();
        let tiered = Product {
            serving_prices: Some(ServingPrices {
                individual: Money::from_minor(12_00, PEN),
                familiar: Money::from_minor(40_00, PEN),
                bandeja: Money::from_minor(100_00, PEN),
            }),
            ..lasagna()
        };

        assert_eq!(single.cart_serving(Serving::Bandeja), Serving::Individual);
        assert_eq!(tiered.cart_serving(Serving::Bandeja), Serving::Bandeja);
    }
}
