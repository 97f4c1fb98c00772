//! # Pricing Request
//!
//! The input boundary: a JSON document carrying the basket, catalogue,
//! offers and optional currency options.
//!
//! ## Request Format
//! ```json
//! {
//!   "basket":    [{ "name": "Baked Beans", "quantity": 4 }],
//!   "catalogue": [{ "name": "Baked Beans", "price": 0.99 },
//!                 { "name": "Shampoo", "variants": [{ "name": "Shampoo (Small)", "price": 2.00 }] }],
//!   "offers":    [{ "productName": "Baked Beans", "rule": { "buyQuantity": 2, "freeQuantity": 1 } }],
//!   "currencyOptions": { "currency": "GBP", "locale": "en-GB" }
//! }
//! ```
//!
//! `offers` and `currencyOptions` are optional. `currencySchema` is accepted
//! as an alias for `currencyOptions`.

use serde::{Deserialize, Serialize};

use crate::basket::PricedBasket;
use crate::config::CurrencyOptions;
use crate::error::CoreResult;
use crate::types::{BasketEntry, Catalogue, Offer};
use crate::validation::validate_request;

/// A parsed pricing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub basket: Vec<BasketEntry>,

    pub catalogue: Catalogue,

    #[serde(default)]
    pub offers: Vec<Offer>,

    #[serde(default, alias = "currencySchema", skip_serializing_if = "Option::is_none")]
    pub currency_options: Option<CurrencyOptions>,
}

impl PricingRequest {
    /// Parses and validates a request.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::request::PricingRequest;
    /// use rust_decimal_macros::dec;
    ///
    /// let request = PricingRequest::from_json(r#"{
    ///     "basket": [{ "name": "Sardines", "quantity": 3 }],
    ///     "catalogue": [{ "name": "Sardines", "price": 1.89 }],
    ///     "offers": [{ "productName": "Sardines", "rule": { "percentage": 25 } }]
    /// }"#).unwrap();
    ///
    /// let priced = request.price().unwrap();
    /// assert_eq!(priced.discount().amount(), dec!(1.42));
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let request: PricingRequest = serde_json::from_str(json)?;
        validate_request(&request)?;
        Ok(request)
    }

    /// Prices the request's basket against its catalogue and offers.
    pub fn price(&self) -> CoreResult<PricedBasket<'_>> {
        PricedBasket::price(&self.basket, &self.catalogue, &self.offers)
    }

    /// Currency options from the request, else `fallback`.
    pub fn currency_or(&self, fallback: CurrencyOptions) -> CurrencyOptions {
        self.currency_options.clone().unwrap_or(fallback)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::BasketTotals;
    use crate::error::CoreError;

    const SHAMPOO_REQUEST: &str = r#"{
        "basket": [
            { "name": "Shampoo (Large)", "quantity": 3 },
            { "name": "Shampoo (Medium)", "quantity": 1 },
            { "name": "Shampoo (Small)", "quantity": 2 }
        ],
        "catalogue": [
            { "name": "Baked Beans", "price": 0.99 },
            { "name": "Shampoo", "variants": [
                { "name": "Shampoo (Small)", "price": 2.00 },
                { "name": "Shampoo (Medium)", "price": 2.50 },
                { "name": "Shampoo (Large)", "price": 3.50 }
            ]}
        ],
        "offers": [
            { "productName": "Shampoo",
              "rule": { "buyQuantity": 3, "freeQuantity": 1, "freeVariant": "Shampoo (Small)" } }
        ],
        "currencySchema": { "currency": "GBP", "locale": "en-GB" }
    }"#;

    #[test]
    fn test_parse_and_price() {
        let request = PricingRequest::from_json(SHAMPOO_REQUEST).unwrap();
        assert_eq!(request.catalogue.products.len(), 2);
        assert_eq!(
            request.currency_options,
            Some(CurrencyOptions::new("GBP", "en-GB"))
        );

        let priced = request.price().unwrap();
        let formatted = BasketTotals::from(&priced).format(&request.currency_or(Default::default()));
        assert_eq!(formatted.sub_total, "£17.00");
        assert_eq!(formatted.discount, "£2.00");
        assert_eq!(formatted.total, "£15.00");
    }

    #[test]
    fn test_offers_are_optional() {
        let request = PricingRequest::from_json(
            r#"{ "basket": [], "catalogue": [{ "name": "Biscuits", "price": 1.20 }] }"#,
        )
        .unwrap();
        assert!(request.offers.is_empty());
        assert!(request.currency_options.is_none());
        assert_eq!(
            request.currency_or(CurrencyOptions::new("USD", "en-US")).currency,
            "USD"
        );
    }

    #[test]
    fn test_malformed_json_is_request_error() {
        let err = PricingRequest::from_json(r#"{ "basket": 3 }"#).unwrap_err();
        assert!(matches!(err, CoreError::Request(_)));
    }

    #[test]
    fn test_negative_buy_quantity_is_rejected() {
        let err = PricingRequest::from_json(
            r#"{ "basket": [], "catalogue": [],
                 "offers": [{ "productName": "X", "rule": { "buyQuantity": -1, "freeQuantity": 1 } }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Request(_)));
    }

    #[test]
    fn test_invalid_price_is_validation_error() {
        let err = PricingRequest::from_json(
            r#"{ "basket": [], "catalogue": [{ "name": "Biscuits", "price": 0 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_huge_quantities_fail_with_overflow() {
        let free_units = PricingRequest::from_json(
            r#"{ "basket": [{ "name": "Pennies", "quantity": 9000000000000000000 }],
                 "catalogue": [{ "name": "Pennies", "price": 0.01 }],
                 "offers": [{ "productName": "Pennies",
                              "rule": { "buyQuantity": 1, "freeQuantity": 4000000000 } }] }"#,
        )
        .unwrap();
        let err = free_units.price().unwrap_err();
        assert!(matches!(err, CoreError::Overflow { .. }));

        let sub_total = PricingRequest::from_json(
            r#"{ "basket": [{ "name": "Yacht", "quantity": 9000000000000000000 }],
                 "catalogue": [{ "name": "Yacht", "price": 100000000000 }] }"#,
        )
        .unwrap();
        let err = sub_total.price().unwrap_err();
        assert!(matches!(err, CoreError::Overflow { subject } if subject == "Yacht"));
    }
}
