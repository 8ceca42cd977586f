//! Terminal Storefront Example
//!
//! Opens the storefront against a snapshot directory, applies the intents
//! given on the command line and prints the visible products and the cart.
//!
//! Use `-s` to search, `--serving` to filter by serving type
//! Use `-a ID[:SERVING]` to add to the cart and `-f ID` to toggle a favorite
//! Snapshots persist in `--store-dir` (default `target/storefront`) between runs

use std::{io, io::Write};

use anyhow::Result;
use clap::Parser;
use rusty_money::Money;
use tabled::{builder::Builder, settings::Style};
use tracing_subscriber::EnvFilter;

use lasagna::{
    fixtures::{bundled_catalog, load_catalog_file},
    prelude::*,
    utils::ExampleStorefrontArgs,
};

/// Terminal Storefront Example
pub fn main() -> Result<()> {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let args = ExampleStorefrontArgs::parse();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    let loaded = match &args.catalog {
        Some(path) => load_catalog_file(path)?,
        None => bundled_catalog()?,
    };

    let currency = loaded.catalog.currency();
    let store = FileStore::open(&args.store_dir)?;
    let mut storefront = Storefront::open(loaded.catalog, loaded.delivery, store);

    if let Some(search) = args.search {
        storefront.apply(Intent::SearchChanged(search))?;
    }

    for serving in args.serving {
        storefront.apply(Intent::FacetToggled(Facet::Serving(serving)))?;
    }

    if let Some(max_price_minor) = args.max_price_minor {
        storefront.apply(Intent::MaxPriceSet(Some(Money::from_minor(
            max_price_minor,
            currency,
        ))))?;
    }

    if args.clear {
        storefront.apply(Intent::ClearCart)?;
    }

    for (product, serving) in args.add {
        storefront.apply(Intent::AddToCart { product, serving })?;
    }

    for id in args.favorite {
        storefront.apply(Intent::ToggleFavorite(ProductId(id)))?;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_products(&mut handle, &storefront)?;

    let summary = storefront.summary();

    if storefront.cart().is_empty() {
        writeln!(handle, " Tu carrito está vacío.\n")?;
    } else {
        summary.write_to(&mut handle, storefront.cart(), storefront.catalog())?;
    }

    if args.checkout
        && let CheckoutOutcome::NotAvailable(notice) = storefront.checkout()
    {
        writeln!(handle, " {notice}\n")?;
    }

    Ok(())
}

fn write_products<S: KeyValueStore>(
    out: &mut impl Write,
    storefront: &Storefront<'_, S>,
) -> io::Result<()> {
    let products = storefront.visible_products();

    if products.is_empty() {
        return writeln!(out, "\n No se encontraron productos que coincidan.\n");
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Id", "Product", "Serving", "Weight", "Line", "Price"]);

    for product in products {
        let favorite = if storefront.is_favorite(product.id) {
            "♥"
        } else {
            ""
        };

        let price = match product.previous_price {
            Some(previous) if product.savings().is_some() => {
                format!("{} (was {previous})", product.price)
            }
            _ => format!("{}", product.price),
        };

        builder.push_record([
            favorite.to_string(),
            product.id.to_string(),
            product.name.clone(),
            product.serving.to_string(),
            product.weight.to_string(),
            product.line.clone(),
            price,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    writeln!(out, "\n{table}")
}
