//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError            - Pricing failures (abort the whole basket)      │
//! │  ├── Overflow         - Amounts beyond Decimal / i64 range             │
//! │  ├── ValidationError  - Request fields that break the schema           │
//! │  └── ConfigError      - Bad currency/locale environment values         │
//! │                                                                         │
//! │  NOT errors (silently skipped):                                        │
//! │  • Basket entry with no name / no quantity                             │
//! │  • Basket entry whose name is not in the catalogue                     │
//! │  • freeVariant that names no variant of the product                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, field path)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing errors.
///
/// A single failing line item aborts the entire pricing computation; there is
/// no partial-basket recovery.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item quantity is below one.
    ///
    /// ## When This Occurs
    /// - A basket entry carries a negative quantity
    /// - A caller builds a `LineItem` directly with quantity 0
    #[error("Quantity for {product} must be greater than or equal to 1, got {quantity}")]
    InvalidQuantity { product: String, quantity: i64 },

    /// Neither the variant nor the product supplies a price.
    #[error("Either product or variant must have a price: {product}")]
    MissingPrice { product: String },

    /// An amount or free-unit count left the representable range.
    ///
    /// `subject` is the line item's product name, or the basket total that
    /// overflowed.
    #[error("Arithmetic overflow while pricing {subject}")]
    Overflow { subject: String },

    /// The request JSON could not be parsed into typed data.
    #[error("Invalid pricing request: {0}")]
    Request(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error (wraps ConfigError).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` is a path into the request, e.g. `catalogue[3].variants[0].price`.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
