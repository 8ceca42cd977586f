//! Cart drawer.

use leptos::prelude::*;

use lasagna::{
    cart::QuantityChange,
    checkout::CheckoutOutcome,
    intents::{Intent, IntentOutcome},
    storage::KeyValueStore,
    storefront::Storefront,
    summary::CartSummary,
};

use crate::{
    LiveMessage, Shop, announce,
    catalog::{format_money, format_price},
    dispatch,
};

/// UI model for a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineModel {
    /// Line index in the cart
    pub index: usize,

    /// Product name
    pub name: String,

    /// Serving label
    pub serving: String,

    /// Units on the line
    pub quantity: u32,

    /// Price of one unit
    pub unit_price: String,

    /// Unit price times quantity
    pub line_total: String,
}

/// Cart lines in display order.
pub fn cart_line_models<S: KeyValueStore>(storefront: &Storefront<'_, S>) -> Vec<CartLineModel> {
    storefront
        .cart()
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let product = storefront.catalog().get(line.product())?;
            let unit_price = product.unit_price(line.serving());
            let line_total = unit_price
                .to_minor_units()
                .saturating_mul(i64::from(line.quantity()));

            Some(CartLineModel {
                index,
                name: product.name.clone(),
                serving: line.serving().to_string(),
                quantity: line.quantity(),
                unit_price: format_money(&unit_price),
                line_total: format_price(line_total, unit_price.currency().iso_alpha_code),
            })
        })
        .collect()
}

/// Promotional line about the free-delivery threshold.
pub fn delivery_promo(summary: &CartSummary<'_>) -> String {
    if summary.has_free_delivery() {
        "¡Tu pedido tiene delivery gratis!".to_string()
    } else {
        format!(
            "Agrega {} más y el delivery es gratis.",
            format_money(&summary.remaining_for_free_delivery)
        )
    }
}

/// Header button that opens the cart.
#[component]
pub fn CartButton(
    /// Shared storefront session.
    shop: Shop,
    /// Whether the drawer is visible.
    cart_open: RwSignal<bool>,
) -> impl IntoView {
    let item_count = move || shop.with(|storefront| storefront.cart().item_count());

    view! {
        <button
            type="button"
            class="cart-button"
            aria-label=move || format!("Abrir carrito, {} productos", item_count())
            aria-expanded=move || cart_open.get().to_string()
            on:click=move |_| cart_open.update(|open| *open = !*open)
        >
            "Carrito "
            <span class="cart-badge">{item_count}</span>
        </button>
    }
}

#[component]
fn CartLineRow(line: CartLineModel, shop: Shop, live_message: LiveMessage) -> impl IntoView {
    let index = line.index;
    let name_for_decrease = line.name.clone();
    let name_for_remove = line.name.clone();

    view! {
        <li class="cart-line">
            <div>
                <p class="cart-line-name">{line.name.clone()}</p>
                <p class="cart-line-meta">{line.serving} " · " {line.unit_price}</p>
            </div>
            <div class="cart-line-controls">
                <button
                    type="button"
                    class="icon-button icon-button-secondary icon-button-compact"
                    aria-label=format!("Quitar una unidad de {}", line.name)
                    on:click=move |_| {
                        let outcome = dispatch(
                            shop,
                            live_message,
                            Intent::AdjustQuantity { line: index, delta: -1 },
                        );

                        if outcome == Some(IntentOutcome::QuantityChanged(QuantityChange::Removed)) {
                            announce(live_message, format!("{name_for_decrease} quitado del carrito."));
                        }
                    }
                >
                    "−"
                </button>
                <span class="cart-line-quantity">{line.quantity}</span>
                <button
                    type="button"
                    class="icon-button icon-button-primary icon-button-compact"
                    aria-label=format!("Agregar una unidad de {}", line.name)
                    on:click=move |_| {
                        dispatch(shop, live_message, Intent::AdjustQuantity { line: index, delta: 1 });
                    }
                >
                    "+"
                </button>
                <span class="cart-line-total">{line.line_total}</span>
                <button
                    type="button"
                    class="text-button"
                    on:click=move |_| {
                        dispatch(shop, live_message, Intent::RemoveLine(index));
                        announce(live_message, format!("{name_for_remove} quitado del carrito."));
                    }
                >
                    "Eliminar"
                </button>
            </div>
        </li>
    }
}

#[component]
fn CartTotals(summary: CartSummary<'static>) -> impl IntoView {
    let delivery = if summary.has_free_delivery() {
        "Gratis".to_string()
    } else {
        format_money(&summary.delivery_fee)
    };

    view! {
        <div class="cart-summary">
            <p class="cart-summary-row">
                <span>"Subtotal"</span>
                <span>{format_money(&summary.subtotal)}</span>
            </p>
            <p class="cart-summary-row">
                <span>"Delivery"</span>
                <span>{delivery}</span>
            </p>
            <p class="cart-total-row">
                <span>"Total"</span>
                <span>{format_money(&summary.total)}</span>
            </p>
            <p class="cart-promo">{delivery_promo(&summary)}</p>
        </div>
    }
}

/// Cart lines, totals and checkout.
#[component]
pub fn CartDrawer(
    /// Shared storefront session.
    shop: Shop,
    /// Whether the drawer is visible.
    cart_open: RwSignal<bool>,
    /// Screen-reader announcements.
    live_message: LiveMessage,
) -> impl IntoView {
    let checkout_notice = RwSignal::new(None::<String>);

    let on_checkout = move |_: leptos::ev::MouseEvent| {
        let message = match dispatch(shop, live_message, Intent::Checkout) {
            Some(IntentOutcome::Checkout(CheckoutOutcome::NotAvailable(notice))) => notice,
            Some(IntentOutcome::Checkout(CheckoutOutcome::Accepted { reference })) => {
                format!("Pedido {reference} confirmado.")
            }
            _ => return,
        };

        announce(live_message, message.clone());
        checkout_notice.set(Some(message));
    };

    view! {
        <aside
            class=move || {
                if cart_open.get() { "cart-drawer cart-drawer-open" } else { "cart-drawer" }
            }
            aria-label="Carrito"
            aria-hidden=move || (!cart_open.get()).to_string()
        >
            <div class="panel-header">
                <h2 class="panel-title">"Tu carrito"</h2>
                <button type="button" class="text-button" on:click=move |_| cart_open.set(false)>
                    "Cerrar"
                </button>
            </div>
            {move || {
                let (lines, summary) = shop
                    .with(|storefront| (cart_line_models(storefront), storefront.summary()));

                if lines.is_empty() {
                    return view! { <p class="cart-empty">"Tu carrito está vacío."</p> }.into_any();
                }

                view! {
                    <ul class="cart-lines">
                        {lines
                            .into_iter()
                            .map(|line| {
                                view! { <CartLineRow line=line shop=shop live_message=live_message /> }
                            })
                            .collect_view()}
                    </ul>
                    <CartTotals summary=summary />
                    <div class="cart-actions">
                        <button
                            type="button"
                            class="text-button"
                            on:click=move |_| {
                                dispatch(shop, live_message, Intent::ClearCart);
                                checkout_notice.set(None);
                                announce(live_message, "Carrito vaciado.".to_string());
                            }
                        >
                            "Vaciar carrito"
                        </button>
                        <button type="button" class="primary-button" on:click=on_checkout>
                            "Ir a pagar"
                        </button>
                    </div>
                }
                .into_any()
            }}
            {move || {
                checkout_notice
                    .get()
                    .map(|notice| view! { <p class="checkout-notice" role="alert">{notice}</p> })
            }}
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use lasagna::{
        fixtures::bundled_catalog,
        products::{ProductId, Serving},
        storage::MemoryStore,
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cart_line_models_price_each_line() -> TestResult {
        let loaded = bundled_catalog()?;
        let mut storefront = Storefront::open(loaded.catalog, loaded.delivery, MemoryStore::new());

        storefront.add_to_cart(ProductId(2), Serving::Familiar)?;
        storefront.add_to_cart(ProductId(2), Serving::Familiar)?;
        storefront.add_to_cart(ProductId(4), Serving::Familiar)?;

        let lines = cart_line_models(&storefront);

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines.first(),
            Some(&CartLineModel {
                index: 0,
                name: "Lasaña de Pollo".to_string(),
                serving: "familiar".to_string(),
                quantity: 2,
                unit_price: "S/ 45.00".to_string(),
                line_total: "S/ 90.00".to_string(),
            })
        );

        Ok(())
    }

    #[test]
    fn delivery_promo_counts_down_to_free_delivery() -> TestResult {
        let loaded = bundled_catalog()?;
        let mut storefront = Storefront::open(loaded.catalog, loaded.delivery, MemoryStore::new());

        storefront.add_to_cart(ProductId(1), Serving::Familiar)?;

        assert_eq!(
            delivery_promo(&storefront.summary()),
            "Agrega S/ 80.00 más y el delivery es gratis."
        );

        storefront.add_to_cart(ProductId(1), Serving::Bandeja)?;

        assert_eq!(delivery_promo(&storefront.summary()), "¡Tu pedido tiene delivery gratis!");

        Ok(())
    }
}
