//! # Domain Types
//!
//! Catalogue, offer and basket types consumed by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Offer       │   │  BasketEntry    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  product_name   │   │  name?          │       │
//! │  │  price?         │   │  rule           │   │  quantity?      │       │
//! │  │  variants[] ────┼─┐ └────────┬────────┘   └─────────────────┘       │
//! │  └─────────────────┘ │          │                                       │
//! │  ┌─────────────────┐ │ ┌────────▼────────┐                              │
//! │  │    Variant      │◄┘ │   OfferRule     │                              │
//! │  │  name (key)     │   │  Percentage     │                              │
//! │  │  price          │   │  BuyGetFree     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An offer's `product_name` may name a product or a variant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Catalogue
// =============================================================================

/// A priced sub-SKU of a product (e.g. a size option).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Unique within the parent; also referenced globally by offers.
    pub name: String,

    /// Always overrides the parent product's price.
    pub price: Money,
}

/// A product available for sale.
///
/// A product without variants must carry a price; a product with variants
/// relies on its variants' prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Finds a variant of this product by exact name.
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// The product catalogue, in authoritative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    pub products: Vec<Product>,
}

impl Catalogue {
    pub fn new(products: Vec<Product>) -> Self {
        Catalogue { products }
    }

    /// Resolves a basket name to a product and, if the name is a variant's,
    /// that variant.
    ///
    /// ## Resolution Order
    /// Products are scanned in catalogue order. For each product the product
    /// name is checked first, then its variant names. The first match wins,
    /// so catalogue order decides between colliding names.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::types::{Catalogue, Product, Variant};
    /// use basket_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let catalogue = Catalogue::new(vec![Product {
    ///     name: "Shampoo".to_string(),
    ///     price: None,
    ///     variants: vec![Variant {
    ///         name: "Shampoo (Small)".to_string(),
    ///         price: Money::new(dec!(2.00)),
    ///     }],
    /// }]);
    ///
    /// let (product, variant) = catalogue.resolve("Shampoo (Small)").unwrap();
    /// assert_eq!(product.name, "Shampoo");
    /// assert_eq!(variant.unwrap().price.amount(), dec!(2.00));
    /// assert!(catalogue.resolve("Sardines").is_none());
    /// ```
    pub fn resolve(&self, name: &str) -> Option<(&Product, Option<&Variant>)> {
        for product in &self.products {
            if product.name == name {
                return Some((product, None));
            }
            if let Some(variant) = product.variant(name) {
                return Some((product, Some(variant)));
            }
        }
        None
    }
}

// =============================================================================
// Offers
// =============================================================================

/// Discount of a percentage of the line item's subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageRule {
    pub percentage: Decimal,
}

/// Buy `buy_quantity`, get `free_quantity` free.
///
/// With `free_variant` set, the free units are of the named sibling variant
/// and are priced at that variant's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyGetFreeRule {
    pub buy_quantity: u32,
    pub free_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_variant: Option<String>,
}

impl BuyGetFreeRule {
    /// Number of free units earned by buying `quantity` items.
    ///
    /// `floor(quantity / buy_quantity) * free_quantity`; a zero
    /// `buy_quantity` or a non-positive quantity earns nothing. Returns
    /// `None` if the count does not fit in an `i64`.
    pub fn free_units(&self, quantity: i64) -> Option<i64> {
        if self.buy_quantity == 0 || quantity <= 0 {
            return Some(0);
        }
        (quantity / i64::from(self.buy_quantity)).checked_mul(i64::from(self.free_quantity))
    }
}

/// The shape of an offer, resolved once when the request is parsed.
///
/// Untagged: a rule object carrying `percentage` is a percentage rule,
/// anything else is tried as a buy/get rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferRule {
    Percentage(PercentageRule),
    BuyGetFree(BuyGetFreeRule),
}

/// An offer bound to a product or variant name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub product_name: String,
    pub rule: OfferRule,
}

impl Offer {
    pub fn percentage(product_name: impl Into<String>, percentage: Decimal) -> Self {
        Offer {
            product_name: product_name.into(),
            rule: OfferRule::Percentage(PercentageRule { percentage }),
        }
    }

    pub fn buy_get_free(
        product_name: impl Into<String>,
        buy_quantity: u32,
        free_quantity: u32,
        free_variant: Option<&str>,
    ) -> Self {
        Offer {
            product_name: product_name.into(),
            rule: OfferRule::BuyGetFree(BuyGetFreeRule {
                buy_quantity,
                free_quantity,
                free_variant: free_variant.map(str::to_string),
            }),
        }
    }
}

/// Offers whose `product_name` equals `name`, in their original order.
pub fn offers_for<'a>(offers: &'a [Offer], name: &str) -> impl Iterator<Item = &'a Offer> + 'a {
    let name = name.to_string();
    offers.iter().filter(move |o| o.product_name == name)
}

// =============================================================================
// Basket
// =============================================================================

/// A raw basket entry as supplied by the caller.
///
/// Both fields are optional; incomplete entries are dropped when the basket
/// is priced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketEntry {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub quantity: Option<i64>,
}

impl BasketEntry {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        BasketEntry {
            name: Some(name.into()),
            quantity: Some(quantity),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn shampoo() -> Product {
        Product {
            name: "Shampoo".to_string(),
            price: None,
            variants: vec![
                Variant {
                    name: "Shampoo (Small)".to_string(),
                    price: Money::new(dec!(2.00)),
                },
                Variant {
                    name: "Shampoo (Large)".to_string(),
                    price: Money::new(dec!(3.50)),
                },
            ],
        }
    }

    #[test]
    fn test_resolve_product_and_variant() {
        let catalogue = Catalogue::new(vec![
            Product {
                name: "Baked Beans".to_string(),
                price: Some(Money::new(dec!(0.99))),
                variants: vec![],
            },
            shampoo(),
        ]);

        let (product, variant) = catalogue.resolve("Baked Beans").unwrap();
        assert_eq!(product.name, "Baked Beans");
        assert!(variant.is_none());

        let (product, variant) = catalogue.resolve("Shampoo (Large)").unwrap();
        assert_eq!(product.name, "Shampoo");
        assert_eq!(variant.unwrap().name, "Shampoo (Large)");

        assert!(catalogue.resolve("Toothpaste").is_none());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let mut clash = shampoo();
        clash.name = "Other".to_string();
        clash.variants[0].price = Money::new(dec!(9.99));
        let catalogue = Catalogue::new(vec![shampoo(), clash]);

        let (product, variant) = catalogue.resolve("Shampoo (Small)").unwrap();
        assert_eq!(product.name, "Shampoo");
        assert_eq!(variant.unwrap().price.amount(), dec!(2.00));
    }

    #[test]
    fn test_free_units() {
        let rule = BuyGetFreeRule {
            buy_quantity: 2,
            free_quantity: 1,
            free_variant: None,
        };
        assert_eq!(rule.free_units(4), Some(2));
        assert_eq!(rule.free_units(5), Some(2));
        assert_eq!(rule.free_units(1), Some(0));

        let zero_buy = BuyGetFreeRule {
            buy_quantity: 0,
            free_quantity: 1,
            free_variant: None,
        };
        assert_eq!(zero_buy.free_units(10), Some(0));
    }

    #[test]
    fn test_free_units_overflow() {
        let rule = BuyGetFreeRule {
            buy_quantity: 1,
            free_quantity: 4_000_000_000,
            free_variant: None,
        };
        assert_eq!(rule.free_units(2), Some(8_000_000_000));
        assert_eq!(rule.free_units(9_000_000_000_000_000_000), None);
    }

    #[test]
    fn test_offer_rule_shape_from_json() {
        let offer: Offer =
            serde_json::from_str(r#"{"productName": "Sardines", "rule": {"percentage": 25}}"#)
                .unwrap();
        assert_eq!(offer.rule, OfferRule::Percentage(PercentageRule { percentage: dec!(25) }));

        let offer: Offer = serde_json::from_str(
            r#"{"productName": "Shampoo", "rule": {"buyQuantity": 3, "freeQuantity": 1, "freeVariant": "Shampoo (Small)"}}"#,
        )
        .unwrap();
        assert_eq!(
            offer,
            Offer::buy_get_free("Shampoo", 3, 1, Some("Shampoo (Small)"))
        );
    }

    #[test]
    fn test_offers_for_filters_by_name() {
        let offers = vec![
            Offer::percentage("Sardines", dec!(25)),
            Offer::buy_get_free("Baked Beans", 2, 1, None),
            Offer::percentage("Sardines", dec!(35)),
        ];
        let matched: Vec<_> = offers_for(&offers, "Sardines").collect();
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[1], &offers[2]);
    }

    #[test]
    fn test_basket_entry_allows_missing_fields() {
        let entry: BasketEntry = serde_json::from_str(r#"{"quantity": 2}"#).unwrap();
        assert!(entry.name.is_none());
        assert_eq!(entry.quantity, Some(2));
    }
}
