//! Checkout
//!
//! Payment is not wired up yet. A [`CheckoutGateway`] receives a read-only
//! view of the order; [`PendingCheckout`] answers every request with a notice.

use crate::summary::CartSummary;

/// Notice shown while online payment is unavailable.
pub const CHECKOUT_UNAVAILABLE_NOTICE: &str =
    "El pago en línea todavía no está disponible. ¡Muy pronto!";

/// Result of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Checkout cannot proceed; the message is shown to the customer.
    NotAvailable(String),

    /// The gateway accepted the order.
    Accepted {
        /// Gateway reference for the order.
        reference: String,
    },
}

/// Payment seam used by the storefront.
pub trait CheckoutGateway {
    /// Handle a checkout request for the summarized cart.
    fn checkout(&self, summary: &CartSummary<'_>) -> CheckoutOutcome;
}

/// Gateway used until payment is implemented.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingCheckout;

impl CheckoutGateway for PendingCheckout {
    fn checkout(&self, _summary: &CartSummary<'_>) -> CheckoutOutcome {
        CheckoutOutcome::NotAvailable(CHECKOUT_UNAVAILABLE_NOTICE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::PEN};

    use super::*;

    fn summary<'a>(item_count: u64) -> CartSummary<'a> {
        CartSummary {
            item_count,
            subtotal: Money::from_minor(40_00, PEN),
            delivery_fee: Money::from_minor(10_00, PEN),
            total: Money::from_minor(50_00, PEN),
            remaining_for_free_delivery: Money::from_minor(80_00, PEN),
        }
    }

    #[test]
    fn pending_checkout_returns_notice() {
        for item_count in [0, 3] {
            let outcome = PendingCheckout.checkout(&summary(item_count));

            assert_eq!(
                outcome,
                CheckoutOutcome::NotAvailable(CHECKOUT_UNAVAILABLE_NOTICE.to_string())
            );
        }
    }
}
