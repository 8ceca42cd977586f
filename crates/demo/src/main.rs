//! Leptos Lasagna Storefront Demo

use leptos::prelude::*;
use tracing::warn;

use lasagna::{
    fixtures::bundled_catalog,
    intents::{Intent, IntentOutcome},
    storefront::Storefront,
};

mod cart;
mod catalog;
mod logging;
mod storage;

use storage::BrowserStorage;

/// Storefront session shared by every panel.
type Shop = RwSignal<Storefront<'static, BrowserStorage>>;

/// Screen-reader announcement, keyed so repeated messages are re-read.
type LiveMessage = RwSignal<(u64, String)>;

/// Main demo app shell.
#[component]
fn App() -> impl IntoView {
    match bundled_catalog() {
        Ok(loaded) => {
            let shop: Shop = RwSignal::new(Storefront::open(
                loaded.catalog,
                loaded.delivery,
                BrowserStorage,
            ));
            let live_message = RwSignal::new((0_u64, String::new()));
            let cart_open = RwSignal::new(false);

            view! {
                <main class="min-h-screen bg-amber-50 px-4 py-6 text-stone-900">
                    <p class="sr-only" role="status" aria-live="polite" aria-atomic="true">
                        {move || live_message.get().1}
                    </p>
                    <header class="mx-auto mb-6 flex max-w-6xl items-center justify-between">
                        <h1 class="text-2xl font-semibold tracking-tight">"Lasañas de la Casa"</h1>
                        <cart::CartButton shop=shop cart_open=cart_open />
                    </header>
                    <div class="mx-auto grid max-w-6xl grid-cols-1 gap-6 md:grid-cols-[16rem_1fr]">
                        <catalog::FilterSidebar shop=shop live_message=live_message />
                        <div>
                            <catalog::FavoritesStrip shop=shop />
                            <catalog::ProductGrid shop=shop live_message=live_message />
                        </div>
                    </div>
                    <cart::CartDrawer shop=shop cart_open=cart_open live_message=live_message />
                </main>
            }
            .into_any()
        }
        Err(error) => view! {
            <main class="min-h-screen bg-amber-50 px-4 py-6 text-stone-900">
                <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                    <p class="text-sm text-red-700">{error.to_string()}</p>
                </div>
            </main>
        }
        .into_any(),
    }
}

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    leptos::mount::mount_to_body(App);
}

/// Apply an intent to the shared storefront, announcing any error.
fn dispatch(
    shop: Shop,
    live_message: LiveMessage,
    intent: Intent<'static>,
) -> Option<IntentOutcome> {
    match shop.try_update(|storefront| storefront.apply(intent))? {
        Ok(outcome) => Some(outcome),
        Err(error) => {
            warn!(%error, "intent rejected");
            announce(live_message, error.to_string());
            None
        }
    }
}

fn announce(live_message: LiveMessage, message: String) {
    live_message.update(|(id, text)| {
        *id = id.saturating_add(1);
        *text = message;
    });
}
