//! Catalog panels: filters, favorites and product cards.

use leptos::prelude::*;
use rusty_money::{Money, iso::Currency};

use lasagna::{
    filters::Facet,
    fixtures::parse_money,
    intents::{Intent, IntentOutcome},
    products::{Product, ProductId, Serving, WeightClass},
    storage::KeyValueStore,
    storefront::Storefront,
};

use crate::{LiveMessage, Shop, announce, dispatch};

/// Format a minor-unit amount into a currency string.
pub fn format_price(minor_units: i64, currency_code: &str) -> String {
    let abs_minor = minor_units.unsigned_abs();
    let major_units = abs_minor / 100;
    let fractional = abs_minor % 100;
    let sign = if minor_units < 0 { "-" } else { "" };
    let symbol = match currency_code {
        "PEN" => "S/ ",
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    if symbol.is_empty() {
        format!("{sign}{major_units}.{fractional:02} {currency_code}")
    } else {
        format!("{sign}{symbol}{major_units}.{fractional:02}")
    }
}

/// Format a money amount for display.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format_price(money.to_minor_units(), money.currency().iso_alpha_code)
}

/// Parse the price ceiling input, in major units. Blank or invalid input clears it.
fn parse_max_price(input: &str, currency: &'static Currency) -> Option<Money<'static, Currency>> {
    let amount = input.trim();

    if amount.is_empty() {
        return None;
    }

    parse_money(&format!("{amount} {}", currency.iso_alpha_code))
        .ok()
        .filter(|money| money.to_minor_units() >= 0)
}

/// Serving choice offered in a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingOption {
    /// Serving value
    pub serving: Serving,

    /// Option text, e.g. "familiar · S/ 40.00"
    pub label: String,
}

/// UI model for a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardModel {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Image URI
    pub image: String,

    /// Serving type and weight, e.g. "familiar · 750g"
    pub details: String,

    /// Price for the selected serving
    pub price: String,

    /// Struck-through price, when discounted
    pub previous_price: Option<String>,

    /// Discount text
    pub savings: Option<String>,

    /// Serving selector options; empty when the product has a single price
    pub options: Vec<ServingOption>,

    /// Serving "add to cart" files the product under
    pub selected: Serving,

    /// Whether the product is a favorite
    pub is_favorite: bool,
}

impl ProductCardModel {
    /// Build the card for a product from the current storefront state.
    pub fn new<S: KeyValueStore>(storefront: &Storefront<'_, S>, product: &Product<'_>) -> Self {
        let selected = storefront.selected_serving(product.id);

        let options = product
            .serving_prices
            .map(|prices| {
                prices
                    .iter()
                    .map(|(serving, price)| ServingOption {
                        serving,
                        label: format!("{serving} · {}", format_money(&price)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            details: format!("{} · {}", product.serving, product.weight),
            price: format_money(&product.unit_price(selected)),
            previous_price: product
                .previous_price
                .filter(|_| product.savings().is_some())
                .map(|price| format_money(&price)),
            savings: product
                .savings()
                .map(|savings| format!("Ahorras {}", format_money(&savings))),
            options,
            selected,
            is_favorite: storefront.is_favorite(product.id),
        }
    }
}

/// Announcement for an applied intent, if it deserves one.
fn outcome_message(name: &str, outcome: &IntentOutcome) -> Option<String> {
    match outcome {
        IntentOutcome::AddedToCart { .. } => Some(format!("{name} agregado al carrito.")),
        IntentOutcome::FavoriteToggled {
            is_favorite: true, ..
        } => Some(format!("{name} agregado a favoritos.")),
        IntentOutcome::FavoriteToggled {
            is_favorite: false, ..
        } => Some(format!("{name} quitado de favoritos.")),
        _ => None,
    }
}

fn apply_and_announce(shop: Shop, live_message: LiveMessage, name: &str, intent: Intent<'static>) {
    if let Some(message) =
        dispatch(shop, live_message, intent).and_then(|outcome| outcome_message(name, &outcome))
    {
        announce(live_message, message);
    }
}

#[component]
fn FacetCheckbox(
    label: String,
    facet: Facet,
    checked: Signal<bool>,
    shop: Shop,
    live_message: LiveMessage,
) -> impl IntoView {
    view! {
        <label class="facet-option">
            <input
                type="checkbox"
                prop:checked=checked
                on:change=move |_| {
                    dispatch(shop, live_message, Intent::FacetToggled(facet.clone()));
                }
            />
            <span>{label}</span>
        </label>
    }
}

/// Search box and facet filters.
#[component]
pub fn FilterSidebar(
    /// Shared storefront session.
    shop: Shop,
    /// Screen-reader announcements.
    live_message: LiveMessage,
) -> impl IntoView {
    let (lines, currency) = shop.with_untracked(|storefront| {
        (
            storefront
                .catalog()
                .lines()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>(),
            storefront.catalog().currency(),
        )
    });

    let serving_options = Serving::ALL
        .into_iter()
        .map(|serving| {
            let checked = Signal::derive(move || {
                shop.with(|storefront| storefront.filter().servings().contains(&serving))
            });

            view! {
                <FacetCheckbox
                    label=serving.to_string()
                    facet=Facet::Serving(serving)
                    checked=checked
                    shop=shop
                    live_message=live_message
                />
            }
        })
        .collect_view();

    let weight_options = WeightClass::ALL
        .into_iter()
        .map(|weight| {
            let checked = Signal::derive(move || {
                shop.with(|storefront| storefront.filter().weights().contains(&weight))
            });

            view! {
                <FacetCheckbox
                    label=weight.to_string()
                    facet=Facet::Weight(weight)
                    checked=checked
                    shop=shop
                    live_message=live_message
                />
            }
        })
        .collect_view();

    let line_options = lines
        .into_iter()
        .map(|line| {
            let key = line.clone();
            let checked = Signal::derive(move || {
                shop.with(|storefront| storefront.filter().lines().contains(&key))
            });

            view! {
                <FacetCheckbox
                    label=line.clone()
                    facet=Facet::Line(line)
                    checked=checked
                    shop=shop
                    live_message=live_message
                />
            }
        })
        .collect_view();

    view! {
        <aside class="filter-sidebar">
            <label class="filter-search">
                <span class="sr-only">"Buscar"</span>
                <input
                    type="search"
                    placeholder="Buscar lasañas"
                    prop:value=move || shop.with(|storefront| storefront.filter().search().to_string())
                    on:input=move |ev| {
                        dispatch(shop, live_message, Intent::SearchChanged(event_target_value(&ev)));
                    }
                />
            </label>
            <fieldset>
                <legend>"Presentación"</legend>
                {serving_options}
            </fieldset>
            <fieldset>
                <legend>"Peso"</legend>
                {weight_options}
            </fieldset>
            <fieldset>
                <legend>"Línea"</legend>
                {line_options}
            </fieldset>
            <label class="filter-price">
                <span>"Precio máximo"</span>
                <input
                    type="number"
                    min="0"
                    step="0.50"
                    on:change=move |ev| {
                        let max_price = parse_max_price(&event_target_value(&ev), currency);

                        dispatch(shop, live_message, Intent::MaxPriceSet(max_price));
                    }
                />
            </label>
            <button
                type="button"
                class="text-button"
                disabled=move || shop.with(|storefront| storefront.filter().is_unrestricted())
                on:click=move |_| {
                    dispatch(shop, live_message, Intent::FiltersCleared);
                    announce(live_message, "Filtros borrados.".to_string());
                }
            >
                "Borrar filtros"
            </button>
        </aside>
    }
}

/// Names of the favorite products.
#[component]
pub fn FavoritesStrip(
    /// Shared storefront session.
    shop: Shop,
) -> impl IntoView {
    view! {
        {move || {
            let names = shop.with(|storefront| {
                storefront
                    .favorite_products()
                    .into_iter()
                    .map(|product| product.name.clone())
                    .collect::<Vec<_>>()
            });

            if names.is_empty() {
                ().into_any()
            } else {
                view! {
                    <section class="favorites-strip" aria-label="Favoritos">
                        <h2 class="panel-title">"Tus favoritos"</h2>
                        <ul>
                            {names.into_iter().map(|name| view! { <li>"♥ " {name}</li> }).collect_view()}
                        </ul>
                    </section>
                }
                .into_any()
            }
        }}
    }
}

#[component]
fn ProductCard(card: ProductCardModel, shop: Shop, live_message: LiveMessage) -> impl IntoView {
    let id = card.id;
    let name_for_add = card.name.clone();
    let name_for_favorite = card.name.clone();
    let add_label = format!("Agregar {} ({}) al carrito", card.name, card.price);
    let (favorite_class, favorite_label) = if card.is_favorite {
        ("favorite-button favorite-button-active", format!("Quitar {} de favoritos", card.name))
    } else {
        ("favorite-button", format!("Agregar {} a favoritos", card.name))
    };

    let selector = if card.options.is_empty() {
        ().into_any()
    } else {
        let selected = card.selected;

        view! {
            <select
                class="serving-select"
                aria-label="Presentación"
                on:change=move |ev| {
                    if let Ok(serving) = event_target_value(&ev).parse::<Serving>() {
                        dispatch(
                            shop,
                            live_message,
                            Intent::ServingSelected { product: id, serving },
                        );
                    }
                }
            >
                {card
                    .options
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option value=option.serving.as_str() selected={option.serving == selected}>
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    };

    view! {
        <li class="product-card">
            <img class="product-image" src=card.image alt=card.name.clone() />
            <div class="product-body">
                <div class="product-heading">
                    <p class="product-name">{card.name}</p>
                    <button
                        type="button"
                        class=favorite_class
                        aria-label=favorite_label
                        aria-pressed=card.is_favorite.to_string()
                        on:click=move |_| {
                            apply_and_announce(
                                shop,
                                live_message,
                                &name_for_favorite,
                                Intent::ToggleFavorite(id),
                            );
                        }
                    >
                        {if card.is_favorite { "♥" } else { "♡" }}
                    </button>
                </div>
                <p class="product-details">{card.details}</p>
                <p class="product-description">{card.description}</p>
                <div class="product-price-summary">
                    {card.previous_price.map(|value| {
                        view! {
                            <span class="product-shelf-price">
                                <span class="sr-only">"Antes "</span>
                                <del>{value}</del>
                            </span>
                        }
                    })}
                    <span class="product-price">{card.price}</span>
                </div>
                {card.savings.map(|text| view! { <p class="product-savings-line">{text}</p> })}
                {selector}
                <button
                    type="button"
                    class="icon-button icon-button-primary"
                    aria-label=add_label
                    on:click=move |_| {
                        apply_and_announce(
                            shop,
                            live_message,
                            &name_for_add,
                            Intent::AddToCart { product: id, serving: None },
                        );
                    }
                >
                    "Agregar"
                </button>
            </div>
        </li>
    }
}

/// Product cards for the products passing the current filters.
#[component]
pub fn ProductGrid(
    /// Shared storefront session.
    shop: Shop,
    /// Screen-reader announcements.
    live_message: LiveMessage,
) -> impl IntoView {
    view! {
        <section class="products-panel">
            <h2 class="panel-title">"Nuestras lasañas"</h2>
            {move || {
                let cards = shop.with(|storefront| {
                    storefront
                        .visible_products()
                        .into_iter()
                        .map(|product| ProductCardModel::new(storefront, product))
                        .collect::<Vec<_>>()
                });

                if cards.is_empty() {
                    view! {
                        <p class="products-empty">
                            "No encontramos lasañas con esos filtros."
                        </p>
                    }
                    .into_any()
                } else {
                    view! {
                        <ul class="products-grid">
                            {cards
                                .into_iter()
                                .map(|card| {
                                    view! {
                                        <ProductCard card=card shop=shop live_message=live_message />
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use lasagna::{fixtures::bundled_catalog, storage::MemoryStore};
    use rusty_money::iso::PEN;
    use testresult::TestResult;

    use super::*;

    fn storefront() -> Result<Storefront<'static, MemoryStore>, lasagna::fixtures::FixtureError> {
        let loaded = bundled_catalog()?;

        Ok(Storefront::open(loaded.catalog, loaded.delivery, MemoryStore::new()))
    }

    #[test]
    fn format_price_pen() {
        assert_eq!(format_price(12_00, "PEN"), "S/ 12.00");
        assert_eq!(format_price(119_99, "PEN"), "S/ 119.99");
        assert_eq!(format_price(-5, "PEN"), "-S/ 0.05");
    }

    #[test]
    fn format_price_unknown_currency_uses_code() {
        assert_eq!(format_price(1050, "JPY"), "10.50 JPY");
    }

    #[test]
    fn parse_max_price_accepts_major_units() {
        assert_eq!(parse_max_price(" 45.5 ", PEN), Some(Money::from_minor(45_50, PEN)));
        assert_eq!(parse_max_price("", PEN), None);
        assert_eq!(parse_max_price("cheap", PEN), None);
        assert_eq!(parse_max_price("-1", PEN), None);
    }

    #[test]
    fn tiered_card_follows_selected_serving() -> TestResult {
        let mut storefront = storefront()?;

        storefront.select_serving(ProductId(1), Serving::Familiar)?;

        let product = storefront.catalog().get(ProductId(1)).ok_or("missing product")?;
        let card = ProductCardModel::new(&storefront, product);

        assert_eq!(card.selected, Serving::Familiar);
        assert_eq!(card.price, "S/ 40.00");
        assert_eq!(card.options.len(), 3);

        Ok(())
    }

    #[test]
    fn discounted_card_shows_previous_price() -> TestResult {
        let mut storefront = storefront()?;

        storefront.toggle_favorite(ProductId(4))?;

        let product = storefront.catalog().get(ProductId(4)).ok_or("missing product")?;
        let card = ProductCardModel::new(&storefront, product);

        assert!(card.options.is_empty());
        assert_eq!(card.selected, Serving::Familiar);
        assert_eq!(card.price, "S/ 42.00");
        assert_eq!(card.previous_price.as_deref(), Some("S/ 48.00"));
        assert_eq!(card.savings.as_deref(), Some("Ahorras S/ 6.00"));
        assert!(card.is_favorite);

        Ok(())
    }

    #[test]
    fn outcome_message_for_cart_and_favorites() {
        assert_eq!(
            outcome_message("Boloñesa", &IntentOutcome::AddedToCart { line: 0 }).as_deref(),
            Some("Boloñesa agregado al carrito.")
        );
        assert_eq!(
            outcome_message(
                "Boloñesa",
                &IntentOutcome::FavoriteToggled {
                    product: ProductId(4),
                    is_favorite: false
                }
            )
            .as_deref(),
            Some("Boloñesa quitado de favoritos.")
        );
        assert_eq!(outcome_message("Boloñesa", &IntentOutcome::FilterChanged), None);
    }
}
