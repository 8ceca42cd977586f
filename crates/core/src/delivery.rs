//! Delivery fee promotion

use rusty_money::{
    Money,
    iso::{Currency, PEN},
};

/// Default subtotal at which delivery becomes free, in minor units.
pub const DEFAULT_FREE_THRESHOLD_MINOR: i64 = 120_00;

/// Default flat delivery fee, in minor units.
pub const DEFAULT_FLAT_FEE_MINOR: i64 = 10_00;

/// Flat delivery fee, waived once the subtotal reaches a threshold.
///
/// Amounts are compared in minor units; the fixture loader guarantees the
/// policy and the catalog share a currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryPolicy<'a> {
    free_threshold: Money<'a, Currency>,
    flat_fee: Money<'a, Currency>,
}

impl<'a> DeliveryPolicy<'a> {
    /// Creates a policy from a free-delivery threshold and a flat fee.
    #[must_use]
    pub fn new(free_threshold: Money<'a, Currency>, flat_fee: Money<'a, Currency>) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    /// Default policy (free from 120.00, otherwise 10.00) in the given currency.
    #[must_use]
    pub fn with_currency(currency: &'a Currency) -> Self {
        Self::new(
            Money::from_minor(DEFAULT_FREE_THRESHOLD_MINOR, currency),
            Money::from_minor(DEFAULT_FLAT_FEE_MINOR, currency),
        )
    }

    /// Subtotal at or above which delivery is free.
    #[must_use]
    pub fn free_threshold(&self) -> Money<'a, Currency> {
        self.free_threshold
    }

    /// Fee charged below the threshold.
    #[must_use]
    pub fn flat_fee(&self) -> Money<'a, Currency> {
        self.flat_fee
    }

    /// Check whether a subtotal qualifies for free delivery.
    #[must_use]
    pub fn is_free(&self, subtotal: &Money<'_, Currency>) -> bool {
        subtotal.to_minor_units() >= self.free_threshold.to_minor_units()
    }

    /// Delivery fee for a subtotal: zero at or above the threshold, the flat fee below it.
    #[must_use]
    pub fn fee<'b>(&self, subtotal: &Money<'b, Currency>) -> Money<'b, Currency> {
        let minor = if self.is_free(subtotal) {
            0
        } else {
            self.flat_fee.to_minor_units()
        };

        Money::from_minor(minor, subtotal.currency())
    }

    /// Subtotal plus the delivery fee.
    #[must_use]
    pub fn total<'b>(&self, subtotal: &Money<'b, Currency>) -> Money<'b, Currency> {
        let minor = subtotal
            .to_minor_units()
            .saturating_add(self.fee(subtotal).to_minor_units());

        Money::from_minor(minor, subtotal.currency())
    }

    /// Amount still needed to reach free delivery; zero once reached.
    #[must_use]
    pub fn remaining_for_free_delivery<'b>(
        &self,
        subtotal: &Money<'b, Currency>,
    ) -> Money<'b, Currency> {
        let remaining = self
            .free_threshold
            .to_minor_units()
            .saturating_sub(subtotal.to_minor_units())
            .max(0);

        Money::from_minor(remaining, subtotal.currency())
    }
}

impl Default for DeliveryPolicy<'static> {
    fn default() -> Self {
        Self::with_currency(PEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_just_below_threshold() {
        let policy = DeliveryPolicy::default();
        let subtotal = Money::from_minor(119_99, PEN);

        assert_eq!(policy.fee(&subtotal), Money::from_minor(10_00, PEN));
        assert_eq!(policy.total(&subtotal), Money::from_minor(129_99, PEN));
    }

    #[test]
    fn fee_waived_at_threshold() {
        let policy = DeliveryPolicy::default();
        let subtotal = Money::from_minor(120_00, PEN);

        assert_eq!(policy.fee(&subtotal), Money::from_minor(0, PEN));
        assert_eq!(policy.total(&subtotal), Money::from_minor(120_00, PEN));
    }

    #[test]
    fn empty_subtotal_still_pays_fee() {
        let policy = DeliveryPolicy::default();
        let subtotal = Money::from_minor(0, PEN);

        assert_eq!(policy.total(&subtotal), Money::from_minor(10_00, PEN));
    }

    #[test]
    fn custom_policy() {
        let policy = DeliveryPolicy::new(
            Money::from_minor(50_00, PEN),
            Money::from_minor(5_50, PEN),
        );

        assert_eq!(
            policy.fee(&Money::from_minor(49_00, PEN)),
            Money::from_minor(5_50, PEN)
        );
        assert!(policy.is_free(&Money::from_minor(50_00, PEN)));
    }

    #[test]
    fn remaining_for_free_delivery() {
        let policy = DeliveryPolicy::default();

        assert_eq!(
            policy.remaining_for_free_delivery(&Money::from_minor(40_00, PEN)),
            Money::from_minor(80_00, PEN)
        );
        assert_eq!(
            policy.remaining_for_free_delivery(&Money::from_minor(150_00, PEN)),
            Money::from_minor(0, PEN)
        );
    }
}
