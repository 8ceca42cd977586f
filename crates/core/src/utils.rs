//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::products::{ProductAttributeError, ProductId, Serving};

/// Arguments for the terminal storefront example
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Lasagna storefront in the terminal", long_about = None)]
pub struct ExampleStorefrontArgs {
    /// Catalog fixture file; the bundled catalog is used when omitted
    #[arg(short, long, env = "LASAGNA_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Directory holding the cart and favorites snapshots
    #[arg(short = 'd', long, env = "LASAGNA_STORE_DIR", default_value = "target/storefront")]
    pub store_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Search term matched against names and tags
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show these serving types
    #[arg(long, value_parser = parse_serving)]
    pub serving: Vec<Serving>,

    /// Hide products above this price, in minor units
    #[arg(long)]
    pub max_price_minor: Option<i64>,

    /// Add products to the cart, as `ID` or `ID:SERVING`
    #[arg(short, long, value_parser = parse_cart_entry)]
    pub add: Vec<(ProductId, Option<Serving>)>,

    /// Toggle products as favorites
    #[arg(short, long)]
    pub favorite: Vec<u32>,

    /// Empty the cart before adding
    #[arg(long)]
    pub clear: bool,

    /// Attempt checkout after updating the cart
    #[arg(long)]
    pub checkout: bool,
}

fn parse_serving(value: &str) -> Result<Serving, ProductAttributeError> {
    value.parse()
}

/// Parse a cart entry written as `ID` or `ID:SERVING`.
///
/// A bare `ID` leaves the serving to the storefront's selection.
///
/// # Errors
///
/// Returns a message when the id is not a number or the serving is unknown.
pub fn parse_cart_entry(value: &str) -> Result<(ProductId, Option<Serving>), String> {
    let (id, serving) = match value.split_once(':') {
        Some((id, serving)) => {
            let serving = serving
                .parse::<Serving>()
                .map_err(|error| format!("{error}"))?;

            (id, Some(serving))
        }
        None => (value, None),
    };

    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("Invalid product id '{id}': {error}"))?;

    Ok((ProductId(id), serving))
}
