//! # basket-core: Pure Pricing Logic
//!
//! Prices a shopping basket against a product catalogue and a set of
//! promotional offers, producing a subtotal, a discount and a total.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Pricer                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               apps/basket-cli (I/O, logging setup)              │   │
//! │  │    read JSON ──► PricingRequest ──► price ──► print totals      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  request  │  │  basket   │  │ line_item │  │  offers   │  │   │
//! │  │   │ JSON in   │─►│ aggregate │─►│ compute-  │─►│ percentage│  │   │
//! │  │   │ validate  │  │ resolve   │  │ on-build  │  │ buy/get   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   money (3 significant digits, round up) underlies everything  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`types`] - Catalogue, offer and basket types
//! - [`offers`] - Percentage and buy-X-get-Y-free evaluators
//! - [`line_item`] - Per-entry pricing and best-offer selection
//! - [`basket`] - Basket aggregation and totals
//! - [`request`] - JSON input boundary
//! - [`validation`] - Request validation
//! - [`config`] - Currency options
//! - [`format`] - Currency string rendering
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same basket, catalogue and offers = same totals
//! 2. **No I/O**: file, network and terminal access live in the CLI
//! 3. **Decimal Money**: no floating point anywhere in the math
//! 4. **No Stacking**: one best offer category per line item
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{BasketEntry, BasketTotals, Catalogue, CurrencyOptions, Money, Offer, PricedBasket, Product};
//! use rust_decimal_macros::dec;
//!
//! let catalogue = Catalogue::new(vec![Product {
//!     name: "Sardines".to_string(),
//!     price: Some(Money::new(dec!(1.89))),
//!     variants: vec![],
//! }]);
//! let offers = vec![Offer::percentage("Sardines", dec!(25))];
//! let basket = vec![BasketEntry::new("Sardines", 3)];
//!
//! let priced = PricedBasket::price(&basket, &catalogue, &offers).unwrap();
//! let formatted = BasketTotals::from(&priced).format(&CurrencyOptions::default());
//!
//! assert_eq!(formatted.sub_total, "£5.67");
//! assert_eq!(formatted.discount, "£1.42");
//! assert_eq!(formatted.total, "£4.25");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod config;
pub mod error;
pub mod format;
pub mod line_item;
pub mod money;
pub mod offers;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use basket_core::Money` instead of
// `use basket_core::money::Money`

pub use basket::{BasketTotals, FormattedTotals, PricedBasket};
pub use config::CurrencyOptions;
pub use error::{ConfigError, CoreError, CoreResult, ValidationError};
pub use line_item::LineItem;
pub use money::Money;
pub use request::PricingRequest;
pub use types::*;
