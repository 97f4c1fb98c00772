//! # Validation Module
//!
//! Schema-level checks on a parsed [`PricingRequest`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shapes and types (rule kind, non-negative buy/free quantities)    │
//! │  └── Malformed JSON → CoreError::Request                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names present, prices and percentages positive                    │
//! │  └── Basket quantities positive when given                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: LineItem construction                                        │
//! │  ├── InvalidQuantity                                                   │
//! │  └── MissingPrice (product without price and no variant chosen)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Basket entries with no name or no quantity are NOT validation errors;
//! they are dropped at pricing time.
//!
//! ## Usage
//! ```rust
//! use basket_core::request::PricingRequest;
//! use basket_core::validation::validate_request;
//!
//! let request = PricingRequest::default();
//! validate_request(&request).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::request::PricingRequest;
use crate::types::{Offer, OfferRule, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a name is present.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a price.
///
/// ## Example
/// ```rust
/// use basket_core::money::Money;
/// use basket_core::validation::validate_price;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_price("price", Money::new(dec!(0.99))).is_ok());
/// assert!(validate_price("price", Money::zero()).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a percentage (must be > 0).
pub fn validate_percentage(field: &str, percentage: Decimal) -> ValidationResult<()> {
    if percentage <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a basket quantity (must be > 0).
pub fn validate_quantity(field: &str, quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

fn validate_product(index: usize, product: &Product) -> ValidationResult<()> {
    validate_name(&format!("catalogue[{index}].name"), &product.name)?;

    if let Some(price) = product.price {
        validate_price(&format!("catalogue[{index}].price"), price)?;
    }

    for (v, variant) in product.variants.iter().enumerate() {
        validate_name(&format!("catalogue[{index}].variants[{v}].name"), &variant.name)?;
        validate_price(
            &format!("catalogue[{index}].variants[{v}].price"),
            variant.price,
        )?;
    }

    Ok(())
}

fn validate_offer(index: usize, offer: &Offer) -> ValidationResult<()> {
    validate_name(&format!("offers[{index}].productName"), &offer.product_name)?;

    match &offer.rule {
        OfferRule::Percentage(rule) => {
            validate_percentage(&format!("offers[{index}].rule.percentage"), rule.percentage)
        }
        OfferRule::BuyGetFree(_) => Ok(()),
    }
}

/// Validates a whole request, stopping at the first failure.
pub fn validate_request(request: &PricingRequest) -> ValidationResult<()> {
    for (index, entry) in request.basket.iter().enumerate() {
        if let Some(quantity) = entry.quantity {
            validate_quantity(&format!("basket[{index}].quantity"), quantity)?;
        }
    }

    for (index, product) in request.catalogue.products.iter().enumerate() {
        validate_product(index, product)?;
    }

    for (index, offer) in request.offers.iter().enumerate() {
        validate_offer(index, offer)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
