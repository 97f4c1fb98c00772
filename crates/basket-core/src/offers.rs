//! # Offer Evaluators
//!
//! Pure functions from a line item's context plus rule parameters to a
//! discount amount.
//!
//! ## Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PercentageDiscountOffer                                                │
//! │    max(percentages) ──► sub_total / 100 × max                          │
//! │                                                                         │
//! │  BuyXGetYFreeOffer                                                      │
//! │    same-item rules ──► best free-unit count × unit price          ┐    │
//! │    cross-variant   ──► best (free units × free variant price)     ├ max │
//! │                                                                    ┘    │
//! │  Rules within a family never stack: only the best one applies.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Evaluators return `None` when the discount overflows.

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::{BuyGetFreeRule, Variant};

/// Something that resolves to a discount amount.
pub trait DiscountRule {
    /// The discount, or `None` on arithmetic overflow.
    fn discount(&self) -> Option<Money>;
}

// =============================================================================
// Percentage Discount
// =============================================================================

/// Percentage off the line item's subtotal.
///
/// Only the highest percentage applies; percentages never add up.
///
/// ## Example
/// ```rust
/// use basket_core::money::Money;
/// use basket_core::offers::{DiscountRule, PercentageDiscountOffer};
/// use rust_decimal_macros::dec;
///
/// let percentages = [dec!(25), dec!(35)];
/// let offer = PercentageDiscountOffer::new(Money::new(dec!(5.67)), &percentages);
/// assert_eq!(offer.discount().unwrap().amount(), dec!(1.99));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PercentageDiscountOffer<'a> {
    sub_total: Money,
    percentages: &'a [Decimal],
}

impl<'a> PercentageDiscountOffer<'a> {
    pub fn new(sub_total: Money, percentages: &'a [Decimal]) -> Self {
        PercentageDiscountOffer {
            sub_total,
            percentages,
        }
    }
}

impl DiscountRule for PercentageDiscountOffer<'_> {
    fn discount(&self) -> Option<Money> {
        match self.percentages.iter().copied().max() {
            Some(best) if best > Decimal::ZERO => self
                .sub_total
                .divided_by(Decimal::ONE_HUNDRED)
                .checked_times(best),
            _ => Some(Money::zero()),
        }
    }
}

// =============================================================================
// Buy X Get Y Free
// =============================================================================

/// Free units earned by quantity thresholds.
///
/// `variants` is the parent product's variant list, used to price rules that
/// name a `free_variant`. A free variant that is not in the list contributes
/// nothing.
///
/// ## Example
/// ```rust
/// use basket_core::money::Money;
/// use basket_core::offers::{BuyXGetYFreeOffer, DiscountRule};
/// use basket_core::types::BuyGetFreeRule;
/// use rust_decimal_macros::dec;
///
/// let rules = [BuyGetFreeRule { buy_quantity: 2, free_quantity: 1, free_variant: None }];
/// let offer = BuyXGetYFreeOffer::new(4, Money::new(dec!(0.99)), &rules, &[]);
/// assert_eq!(offer.discount().unwrap().amount(), dec!(1.98));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BuyXGetYFreeOffer<'a> {
    quantity: i64,
    unit_price: Money,
    rules: &'a [BuyGetFreeRule],
    variants: &'a [Variant],
}

impl<'a> BuyXGetYFreeOffer<'a> {
    pub fn new(
        quantity: i64,
        unit_price: Money,
        rules: &'a [BuyGetFreeRule],
        variants: &'a [Variant],
    ) -> Self {
        BuyXGetYFreeOffer {
            quantity,
            unit_price,
            rules,
            variants,
        }
    }

    /// Best same-item rule, priced at the purchased item's unit price.
    ///
    /// Rules are compared by free-unit count.
    pub fn same_item_discount(&self) -> Option<Money> {
        let free_units = self
            .rules
            .iter()
            .filter(|r| r.free_variant.is_none())
            .try_fold(0_i64, |best, r| Some(best.max(r.free_units(self.quantity)?)))?;
        self.unit_price.checked_mul(free_units)
    }

    /// Best cross-variant rule.
    ///
    /// Free variants differ in price, so rules are compared by the resulting
    /// discount, not by unit count.
    pub fn cross_variant_discount(&self) -> Option<Money> {
        self.rules
            .iter()
            .filter_map(|r| {
                let name = r.free_variant.as_deref()?;
                let variant = self.variants.iter().find(|v| v.name == name)?;
                Some((r, variant))
            })
            .try_fold(Money::zero(), |best, (r, variant)| {
                let discount = variant.price.checked_mul(r.free_units(self.quantity)?)?;
                Some(best.max_of(discount))
            })
    }
}

impl DiscountRule for BuyXGetYFreeOffer<'_> {
    fn discount(&self) -> Option<Money> {
        Some(self.same_item_discount()?.max_of(self.cross_variant_discount()?))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn shampoo_variants() -> Vec<Variant> {
        [("Small", dec!(2.00)), ("Medium", dec!(2.50)), ("Large", dec!(3.50))]
            .into_iter()
            .map(|(size, price)| Variant {
                name: format!("Shampoo ({})", size),
                price: Money::new(price),
            })
            .collect()
    }

    fn same_item(buy: u32, free: u32) -> BuyGetFreeRule {
        BuyGetFreeRule {
            buy_quantity: buy,
            free_quantity: free,
            free_variant: None,
        }
    }

    fn cross_variant(buy: u32, free: u32, variant: &str) -> BuyGetFreeRule {
        BuyGetFreeRule {
            buy_quantity: buy,
            free_quantity: free,
            free_variant: Some(variant.to_string()),
        }
    }

    #[test]
    fn test_percentage_single() {
        let percentages = [dec!(25)];
        let offer = PercentageDiscountOffer::new(Money::new(dec!(5.67)), &percentages);
        assert_eq!(offer.discount().unwrap().amount(), dec!(1.42));
    }

    #[test]
    fn test_percentage_highest_wins() {
        let percentages = [dec!(25), dec!(35)];
        let offer = PercentageDiscountOffer::new(Money::new(dec!(5.67)), &percentages);
        assert_eq!(offer.discount().unwrap().amount(), dec!(1.99));
    }

    #[test]
    fn test_percentage_empty_is_zero() {
        let offer = PercentageDiscountOffer::new(Money::new(dec!(5.67)), &[]);
        assert!(offer.discount().unwrap().is_zero());
    }

    #[test]
    fn test_buy_get_free_same_item() {
        let rules = [same_item(2, 1)];
        let offer = BuyXGetYFreeOffer::new(4, Money::new(dec!(0.99)), &rules, &[]);
        assert_eq!(offer.discount().unwrap().amount(), dec!(1.98));
    }

    #[test]
    fn test_buy_get_free_rules_do_not_stack() {
        let rules = [same_item(2, 1), same_item(3, 1)];
        let offer = BuyXGetYFreeOffer::new(4, Money::new(dec!(0.99)), &rules, &[]);
        assert_eq!(offer.discount().unwrap().amount(), dec!(1.98));
    }

    #[test]
    fn test_buy_get_free_below_threshold() {
        let rules = [same_item(3, 1)];
        let offer = BuyXGetYFreeOffer::new(2, Money::new(dec!(0.99)), &rules, &[]);
        assert!(offer.discount().unwrap().is_zero());
    }

    #[test]
    fn test_buy_zero_is_no_discount() {
        let rules = [same_item(0, 1)];
        let offer = BuyXGetYFreeOffer::new(4, Money::new(dec!(0.99)), &rules, &[]);
        assert!(offer.discount().unwrap().is_zero());
    }

    #[test]
    fn test_cross_variant_uses_free_variant_price() {
        let variants = shampoo_variants();
        let rules = [cross_variant(3, 1, "Shampoo (Small)")];
        let offer = BuyXGetYFreeOffer::new(3, Money::new(dec!(3.50)), &rules, &variants);
        assert_eq!(offer.discount().unwrap().amount(), dec!(2.00));
    }

    #[test]
    fn test_cross_variant_compares_discount_not_units() {
        let variants = shampoo_variants();
        // 2 free Small (4.00) beats 1 free Large (3.50)
        let rules = [
            cross_variant(3, 1, "Shampoo (Large)"),
            cross_variant(3, 2, "Shampoo (Small)"),
        ];
        let offer = BuyXGetYFreeOffer::new(3, Money::new(dec!(2.50)), &rules, &variants);
        assert_eq!(offer.cross_variant_discount().unwrap().amount(), dec!(4.00));
    }

    #[test]
    fn test_unknown_free_variant_contributes_zero() {
        let variants = shampoo_variants();
        let rules = [cross_variant(1, 1, "Shampoo (Travel)")];
        let offer = BuyXGetYFreeOffer::new(5, Money::new(dec!(3.50)), &rules, &variants);
        assert!(offer.discount().unwrap().is_zero());
    }

    #[test]
    fn test_same_item_beats_cross_variant() {
        let variants = shampoo_variants();
        let rules = [cross_variant(3, 1, "Shampoo (Small)"), same_item(4, 2)];
        let offer = BuyXGetYFreeOffer::new(5, Money::new(dec!(3.50)), &rules, &variants);
        assert_eq!(offer.same_item_discount().unwrap().amount(), dec!(7.00));
        assert_eq!(offer.cross_variant_discount().unwrap().amount(), dec!(2.00));
        assert_eq!(offer.discount().unwrap().amount(), dec!(7.00));
    }

    #[test]
    fn test_buy_get_free_overflow_is_none() {
        let quantity = 9_000_000_000_000_000_000;

        let rules = [same_item(1, 4_000_000_000)];
        let offer = BuyXGetYFreeOffer::new(quantity, Money::new(dec!(0.01)), &rules, &[]);
        assert!(offer.discount().is_none());

        let variants = shampoo_variants();
        let rules = [cross_variant(1, 4_000_000_000, "Shampoo (Small)")];
        let offer = BuyXGetYFreeOffer::new(quantity, Money::new(dec!(3.50)), &rules, &variants);
        assert!(offer.cross_variant_discount().is_none());
    }

    #[test]
    fn test_percentage_overflow_is_none() {
        let percentages = [dec!(1000000)];
        let offer = PercentageDiscountOffer::new(Money::new(Decimal::MAX), &percentages);
        assert!(offer.discount().is_none());
    }
}
