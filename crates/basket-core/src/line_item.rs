//! # Line Item Pricer
//!
//! One resolved basket entry: a product (and optionally one of its
//! variants), a quantity, and the offers that apply to it.
//!
//! ## Compute-on-Build
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem::new(...)                                                     │
//! │       │                                                                 │
//! │       ├── quantity < 1?            → Err(InvalidQuantity)               │
//! │       ├── no variant/product price → Err(MissingPrice)                  │
//! │       ├── any step overflows       → Err(Overflow)                      │
//! │       │                                                                 │
//! │       ├── unit_price = variant.price ?? product.price                   │
//! │       ├── sub_total  = unit_price × quantity                            │
//! │       ├── discount   = max(percentage offers, buy/get offers)           │
//! │       └── total      = sub_total − discount                             │
//! │                                                                         │
//! │  Everything is computed once. The value is immutable afterwards.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Percentage and buy/get offers never combine: only the better category
//! applies to the line.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::offers::{BuyXGetYFreeOffer, DiscountRule, PercentageDiscountOffer};
use crate::types::{BuyGetFreeRule, Offer, OfferRule, Product, Variant};

/// A priced line of the basket.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    product_name: String,
    quantity: i64,
    product: &'a Product,
    variant: Option<&'a Variant>,
    offers: Vec<&'a Offer>,
    unit_price: Money,
    sub_total: Money,
    discount: Money,
    total: Money,
}

impl<'a> LineItem<'a> {
    /// Builds a line item and resolves its discount.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidQuantity`] when `quantity < 1`
    /// - [`CoreError::MissingPrice`] when neither `variant` nor `product`
    ///   carries a price
    /// - [`CoreError::Overflow`] when an amount leaves the decimal range
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::line_item::LineItem;
    /// use basket_core::money::Money;
    /// use basket_core::types::{Offer, Product};
    /// use rust_decimal_macros::dec;
    ///
    /// let beans = Product {
    ///     name: "Baked Beans".to_string(),
    ///     price: Some(Money::new(dec!(0.99))),
    ///     variants: vec![],
    /// };
    /// let offer = Offer::buy_get_free("Baked Beans", 2, 1, None);
    ///
    /// let item = LineItem::new("Baked Beans", 4, &beans, None, vec![&offer]).unwrap();
    /// assert_eq!(item.sub_total().amount(), dec!(3.96));
    /// assert_eq!(item.discount().amount(), dec!(1.98));
    /// assert_eq!(item.total().amount(), dec!(1.98));
    /// ```
    pub fn new(
        product_name: impl Into<String>,
        quantity: i64,
        product: &'a Product,
        variant: Option<&'a Variant>,
        offers: Vec<&'a Offer>,
    ) -> CoreResult<Self> {
        let product_name = product_name.into();

        if quantity < 1 {
            return Err(CoreError::InvalidQuantity {
                product: product_name,
                quantity,
            });
        }

        let unit_price = match variant {
            Some(variant) => variant.price,
            None => product
                .price
                .filter(|price| !price.is_zero())
                .ok_or_else(|| CoreError::MissingPrice {
                    product: product_name.clone(),
                })?,
        };

        let overflow = || CoreError::Overflow {
            subject: product_name.clone(),
        };
        let sub_total = unit_price.checked_mul(quantity).ok_or_else(overflow)?;
        let discount = resolve_discount(quantity, unit_price, sub_total, product, &offers)
            .ok_or_else(overflow)?;
        let total = sub_total.checked_sub(discount).ok_or_else(overflow)?;

        debug!(
            product = %product_name,
            quantity,
            unit_price = %unit_price,
            sub_total = %sub_total,
            discount = %discount,
            offers = offers.len(),
            "Priced line item"
        );

        Ok(LineItem {
            product_name,
            quantity,
            product,
            variant,
            offers,
            unit_price,
            sub_total,
            discount,
            total,
        })
    }

    /// The name the basket entry used (product or variant name).
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    pub fn variant(&self) -> Option<&'a Variant> {
        self.variant
    }

    /// Offers bound to the product, then offers bound to the variant.
    pub fn offers(&self) -> &[&'a Offer] {
        &self.offers
    }

    /// Variant price if a variant was given, else the product price.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price × quantity`, before discount.
    pub fn sub_total(&self) -> Money {
        self.sub_total
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    /// `sub_total − discount`.
    pub fn total(&self) -> Money {
        self.total
    }
}

/// Partitions offers by rule shape and returns the better category's discount.
///
/// The percentage category must be strictly greater to win. `None` on
/// overflow in either category.
fn resolve_discount(
    quantity: i64,
    unit_price: Money,
    sub_total: Money,
    product: &Product,
    offers: &[&Offer],
) -> Option<Money> {
    let mut percentages: Vec<Decimal> = Vec::new();
    let mut buy_get_rules: Vec<BuyGetFreeRule> = Vec::new();

    for offer in offers {
        match &offer.rule {
            OfferRule::Percentage(rule) => percentages.push(rule.percentage),
            OfferRule::BuyGetFree(rule) => buy_get_rules.push(rule.clone()),
        }
    }

    let percentage_discount = if percentages.is_empty() {
        Money::zero()
    } else {
        PercentageDiscountOffer::new(sub_total, &percentages).discount()?
    };

    let buy_get_discount = if buy_get_rules.is_empty() {
        Money::zero()
    } else {
        BuyXGetYFreeOffer::new(quantity, unit_price, &buy_get_rules, &product.variants)
            .discount()?
    };

    Some(buy_get_discount.max_of(percentage_discount))
}

// =============================================================================
// Unit Tests
// =============================================================================
