//! Catalog fixtures
//!
//! The catalog and delivery policy are described in YAML, with prices written
//! as `"AMOUNT CURRENCY"` strings.

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, PEN, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    delivery::DeliveryPolicy,
    products::{Product, ProductAttributeError, ProductId, Serving, ServingPrices, WeightClass},
    tags::Tags,
};

/// Catalog bundled with the storefront.
pub const BUNDLED_CATALOG_YAML: &str = include_str!("../../../fixtures/catalog/lasagnas.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid product attribute
    #[error("Invalid product {0}: {1}")]
    InvalidProduct(u32, ProductAttributeError),

    /// Delivery policy currency differs from the catalog
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Catalog validation failed
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Delivery fee settings; defaults apply when omitted
    #[serde(default)]
    pub delivery: Option<DeliveryFixture>,

    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Delivery fee settings
#[derive(Debug, Deserialize)]
pub struct DeliveryFixture {
    /// Subtotal at which delivery becomes free (e.g., "120.00 PEN")
    pub free_threshold: String,

    /// Fee charged below the threshold (e.g., "10.00 PEN")
    pub flat_fee: String,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Image URI
    #[serde(default)]
    pub image: String,

    /// Shelf price (e.g., "12.00 PEN")
    pub price: String,

    /// Price before the current promotion
    #[serde(default)]
    pub previous_price: Option<String>,

    /// Weight in grams: 500, 750 or 1000
    pub weight: u16,

    /// Serving type
    pub serving: Serving,

    /// Product line
    pub line: String,

    /// Product tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Per-serving prices
    #[serde(default)]
    pub prices: Option<ServingPricesFixture>,
}

/// Per-serving prices
#[derive(Debug, Deserialize)]
pub struct ServingPricesFixture {
    /// Single portion price
    pub individual: String,

    /// Family-sized price
    pub familiar: String,

    /// Party tray price
    pub bandeja: String,
}

/// Catalog and delivery policy loaded from a fixture.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// Products
    pub catalog: Catalog<'static>,

    /// Delivery fee policy
    pub delivery: DeliveryPolicy<'static>,
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let weight = WeightClass::try_from(fixture.weight)
            .map_err(|error| FixtureError::InvalidProduct(fixture.id, error))?;

        let previous_price = fixture.previous_price.as_deref().map(parse_money).transpose()?;

        let serving_prices = fixture
            .prices
            .map(|prices| -> Result<ServingPrices<'static>, FixtureError> {
                Ok(ServingPrices {
                    individual: parse_money(&prices.individual)?,
                    familiar: parse_money(&prices.familiar)?,
                    bandeja: parse_money(&prices.bandeja)?,
                })
            })
            .transpose()?;

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            description: fixture.description,
            image: fixture.image,
            price: parse_money(&fixture.price)?,
            previous_price,
            weight,
            serving: fixture.serving,
            line: fixture.line,
            tags: fixture.tags.iter().map(String::as_str).collect::<Tags>(),
            serving_prices,
        })
    }
}

impl TryFrom<CatalogFixture> for LoadedCatalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::new(products)?;

        let delivery = match fixture.delivery {
            Some(delivery) => {
                let free_threshold = parse_money(&delivery.free_threshold)?;
                let flat_fee = parse_money(&delivery.flat_fee)?;

                for amount in [free_threshold, flat_fee] {
                    if amount.currency() != catalog.currency() {
                        return Err(FixtureError::CurrencyMismatch(
                            catalog.currency().iso_alpha_code.to_string(),
                            amount.currency().iso_alpha_code.to_string(),
                        ));
                    }
                }

                DeliveryPolicy::new(free_threshold, flat_fee)
            }
            None => DeliveryPolicy::with_currency(catalog.currency()),
        };

        Ok(Self { catalog, delivery })
    }
}

/// Parse a catalog fixture from YAML.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed, a price or attribute
/// is invalid, or the catalog fails validation.
pub fn load_catalog(yaml: &str) -> Result<LoadedCatalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    LoadedCatalog::try_from(fixture)
}

/// Read and parse a catalog fixture file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<LoadedCatalog, FixtureError> {
    load_catalog(&fs::read_to_string(path)?)
}

/// Parse the bundled catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the bundled fixture is invalid.
pub fn bundled_catalog() -> Result<LoadedCatalog, FixtureError> {
    load_catalog(BUNDLED_CATALOG_YAML)
}

/// Parse price string (e.g., "12.00 PEN") into a money amount.
///
/// # Errors
///
/// Returns an error if the string is not a valid price.
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse price string (e.g., "12.00 PEN") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal or has fractions of a minor
/// unit, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::new(100, 0))
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "PEN" => PEN,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
