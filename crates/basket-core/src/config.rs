//! # Currency Configuration
//!
//! Currency and locale used when rendering totals.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Pricing request (`currencyOptions`)      (highest priority)        │
//! │  2. Environment variables                                              │
//! │     BASKET_CURRENCY=EUR                                                │
//! │     BASKET_LOCALE=de-DE                                                │
//! │  3. Default values                           (lowest priority)         │
//! │     GBP / en-GB                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading the environment is the only ambient input in this crate; pricing
//! itself never consults it.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ConfigError;

pub const DEFAULT_CURRENCY: &str = "GBP";
pub const DEFAULT_LOCALE: &str = "en-GB";

pub const CURRENCY_ENV: &str = "BASKET_CURRENCY";
pub const LOCALE_ENV: &str = "BASKET_LOCALE";

/// ISO 4217 currency code plus a BCP 47 locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOptions {
    pub currency: String,
    pub locale: String,
}

impl CurrencyOptions {
    pub fn new(currency: impl Into<String>, locale: impl Into<String>) -> Self {
        CurrencyOptions {
            currency: currency.into(),
            locale: locale.into(),
        }
    }

    /// Load options from environment variables, falling back per variable
    /// to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable lookup.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::config::CurrencyOptions;
    ///
    /// let options = CurrencyOptions::from_lookup(|key| match key {
    ///     "BASKET_CURRENCY" => Some("EUR".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(options.currency, "EUR");
    /// assert_eq!(options.locale, "en-GB");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| match lookup(key) {
            None => Ok(default.to_string()),
            Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue(key.to_string())),
            Some(value) => Ok(value.trim().to_string()),
        };

        Ok(CurrencyOptions {
            currency: read(CURRENCY_ENV, DEFAULT_CURRENCY)?.to_uppercase(),
            locale: read(LOCALE_ENV, DEFAULT_LOCALE)?,
        })
    }
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        CurrencyOptions::new(DEFAULT_CURRENCY, DEFAULT_LOCALE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CurrencyOptions::default();
        assert_eq!(options.currency, "GBP");
        assert_eq!(options.locale, "en-GB");
    }

    #[test]
    fn test_lookup_falls_back_per_variable() {
        let options = CurrencyOptions::from_lookup(|key| match key {
            LOCALE_ENV => Some("de-DE".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(options, CurrencyOptions::new("GBP", "de-DE"));
    }

    #[test]
    fn test_lookup_normalizes_currency() {
        let options = CurrencyOptions::from_lookup(|key| match key {
            CURRENCY_ENV => Some(" usd ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(options.currency, "USD");
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let err = CurrencyOptions::from_lookup(|key| match key {
            CURRENCY_ENV => Some("  ".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var) if var == CURRENCY_ENV));
    }
}
