//! # Basket Aggregator
//!
//! Turns raw basket entries into priced line items and sums them.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PricedBasket::price                                  │
//! │                                                                         │
//! │  for each BasketEntry (in order)                                        │
//! │       │                                                                 │
//! │       ├── no name / empty name?        → skip                           │
//! │       ├── no quantity / quantity 0?    → skip                           │
//! │       ├── name not in catalogue?       → skip                           │
//! │       │                                                                 │
//! │       ├── offers = offers_for(product) ++ offers_for(variant)           │
//! │       └── LineItem::new(...)?          → error aborts the whole basket  │
//! │                                                                         │
//! │  sub_total = Σ line.sub_total                                           │
//! │  discount  = Σ line.discount                                            │
//! │  total     = Σ line.total        (summed, NOT sub_total − discount)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each sum is a left fold with working-precision rounding at every step, so
//! `total` can differ from `sub_total − discount` in the last digit.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CurrencyOptions;
use crate::error::{CoreError, CoreResult};
use crate::format::format_money;
use crate::line_item::LineItem;
use crate::money::Money;
use crate::types::{offers_for, BasketEntry, Catalogue, Offer};

// =============================================================================
// Priced Basket
// =============================================================================

/// A fully priced basket.
///
/// Borrows the catalogue and offers for the lifetime of the computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedBasket<'a> {
    line_items: Vec<LineItem<'a>>,
    sub_total: Money,
    discount: Money,
    total: Money,
}

impl<'a> PricedBasket<'a> {
    /// Prices `basket` against `catalogue` and `offers`.
    ///
    /// ## Errors
    /// The first line item that fails to build (`InvalidQuantity`,
    /// `MissingPrice`, `Overflow`) aborts pricing, as does a basket sum that
    /// overflows. Unresolvable entries are not errors.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::basket::PricedBasket;
    /// use basket_core::money::Money;
    /// use basket_core::types::{BasketEntry, Catalogue, Offer, Product};
    /// use rust_decimal_macros::dec;
    ///
    /// let catalogue = Catalogue::new(vec![Product {
    ///     name: "Baked Beans".to_string(),
    ///     price: Some(Money::new(dec!(0.99))),
    ///     variants: vec![],
    /// }]);
    /// let offers = vec![Offer::buy_get_free("Baked Beans", 2, 1, None)];
    /// let basket = vec![
    ///     BasketEntry::new("Baked Beans", 4),
    ///     BasketEntry::new("Unknown", 1),
    /// ];
    ///
    /// let priced = PricedBasket::price(&basket, &catalogue, &offers).unwrap();
    /// assert_eq!(priced.line_items().len(), 1);
    /// assert_eq!(priced.sub_total().amount(), dec!(3.96));
    /// assert_eq!(priced.discount().amount(), dec!(1.98));
    /// assert_eq!(priced.total().amount(), dec!(1.98));
    /// ```
    pub fn price(
        basket: &[BasketEntry],
        catalogue: &'a Catalogue,
        offers: &'a [Offer],
    ) -> CoreResult<Self> {
        let line_items = build_line_items(basket, catalogue, offers)?;

        let sub_total = sum_lines(&line_items, "basket subtotal", LineItem::sub_total)?;
        let discount = sum_lines(&line_items, "basket discount", LineItem::discount)?;
        let total = sum_lines(&line_items, "basket total", LineItem::total)?;

        info!(
            entries = basket.len(),
            line_items = line_items.len(),
            sub_total = %sub_total,
            discount = %discount,
            total = %total,
            "Priced basket"
        );

        Ok(PricedBasket {
            line_items,
            sub_total,
            discount,
            total,
        })
    }

    pub fn line_items(&self) -> &[LineItem<'a>] {
        &self.line_items
    }

    pub fn sub_total(&self) -> Money {
        self.sub_total
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Left-folds one field of every line item.
fn sum_lines<'a, F>(line_items: &[LineItem<'a>], subject: &str, field: F) -> CoreResult<Money>
where
    F: Fn(&LineItem<'a>) -> Money,
{
    Money::checked_sum(line_items.iter().map(field)).ok_or_else(|| CoreError::Overflow {
        subject: subject.to_string(),
    })
}

/// Resolves basket entries into line items, dropping unresolvable ones.
fn build_line_items<'a>(
    basket: &[BasketEntry],
    catalogue: &'a Catalogue,
    offers: &'a [Offer],
) -> CoreResult<Vec<LineItem<'a>>> {
    let mut line_items = Vec::with_capacity(basket.len());

    for (index, entry) in basket.iter().enumerate() {
        let (name, quantity) = match (entry.name.as_deref(), entry.quantity) {
            (Some(name), Some(quantity)) if !name.is_empty() && quantity != 0 => (name, quantity),
            _ => {
                debug!(index, "Dropping incomplete basket entry");
                continue;
            }
        };

        let Some((product, variant)) = catalogue.resolve(name) else {
            debug!(index, name = %name, "Dropping basket entry: not in catalogue");
            continue;
        };

        let mut applicable: Vec<&Offer> = offers_for(offers, &product.name).collect();
        if let Some(variant) = variant {
            applicable.extend(offers_for(offers, &variant.name));
        }

        line_items.push(LineItem::new(name, quantity, product, variant, applicable)?);
    }

    Ok(line_items)
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Basket totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketTotals {
    pub item_count: usize,
    pub sub_total: Money,
    pub discount: Money,
    pub total: Money,
}

impl BasketTotals {
    /// Renders the three totals as currency strings.
    pub fn format(&self, options: &CurrencyOptions) -> FormattedTotals {
        FormattedTotals {
            sub_total: format_money(self.sub_total, options),
            discount: format_money(self.discount, options),
            total: format_money(self.total, options),
        }
    }
}

impl From<&PricedBasket<'_>> for BasketTotals {
    fn from(basket: &PricedBasket<'_>) -> Self {
        BasketTotals {
            item_count: basket.line_items.len(),
            sub_total: basket.sub_total,
            discount: basket.discount,
            total: basket.total,
        }
    }
}

/// Totals rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub sub_total: String,
    pub discount: String,
    pub total: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
