//! # Currency Formatting
//!
//! Renders [`Money`] for display. Presentation only: pricing never reads
//! these strings back.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Round to 2 decimal places, half away from zero                     │
//! │  2. Pick separators from the locale's language                         │
//! │       en (default)          1,234.50   symbol first   £1,234.50        │
//! │       de es it nl pt        1.234,50   symbol last    1.234,50 €       │
//! │       fr                    1 234,50   symbol last    1 234,50 €       │
//! │  3. Symbol for GBP USD EUR JPY, else the ISO code                      │
//! │  4. Negative amounts get a leading '-'                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::RoundingStrategy;

use crate::config::CurrencyOptions;
use crate::money::Money;

/// Decimal places shown to the customer.
pub const DISPLAY_DECIMALS: u32 = 2;

struct LocaleStyle {
    group: &'static str,
    decimal: &'static str,
    symbol_last: bool,
}

const ENGLISH: LocaleStyle = LocaleStyle {
    group: ",",
    decimal: ".",
    symbol_last: false,
};

const CONTINENTAL: LocaleStyle = LocaleStyle {
    group: ".",
    decimal: ",",
    symbol_last: true,
};

const FRENCH: LocaleStyle = LocaleStyle {
    group: " ",
    decimal: ",",
    symbol_last: true,
};

fn locale_style(locale: &str) -> &'static LocaleStyle {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match language.as_str() {
        "de" | "es" | "it" | "nl" | "pt" => &CONTINENTAL,
        "fr" => &FRENCH,
        _ => &ENGLISH,
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "GBP" => Some("£"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Inserts `group` every three digits from the right.
fn group_digits(digits: &str, group: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * group.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(group);
        }
        out.push(ch);
    }
    out
}

/// Formats an amount as a currency string.
///
/// ## Example
/// ```rust
/// use basket_core::config::CurrencyOptions;
/// use basket_core::format::format_money;
/// use basket_core::money::Money;
/// use rust_decimal_macros::dec;
///
/// let gbp = CurrencyOptions::default();
/// assert_eq!(format_money(Money::new(dec!(5.03)), &gbp), "£5.03");
///
/// let eur = CurrencyOptions::new("EUR", "de-DE");
/// assert_eq!(format_money(Money::new(dec!(1234.5)), &eur), "1.234,50 €");
/// ```
pub fn format_money(amount: Money, options: &CurrencyOptions) -> String {
    let style = locale_style(&options.locale);

    let rounded = amount
        .amount()
        .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut magnitude = rounded.abs();
    magnitude.rescale(DISPLAY_DECIMALS);
    let text = magnitude.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let number = format!(
        "{}{}{}",
        group_digits(whole, style.group),
        style.decimal,
        fraction
    );

    let sign = if negative { "-" } else { "" };
    match (currency_symbol(&options.currency), style.symbol_last) {
        (Some(symbol), false) => format!("{sign}{symbol}{number}"),
        (Some(symbol), true) => format!("{sign}{number} {symbol}"),
        (None, false) => format!("{sign}{} {number}", options.currency),
        (None, true) => format!("{sign}{number} {}", options.currency),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gbp() -> CurrencyOptions {
        CurrencyOptions::default()
    }

    #[test]
    fn test_pads_to_two_decimals() {
        assert_eq!(format_money(Money::zero(), &gbp()), "£0.00");
        assert_eq!(format_money(Money::new(dec!(17)), &gbp()), "£17.00");
        assert_eq!(format_money(Money::new(dec!(10.5)), &gbp()), "£10.50");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_money(Money::new(dec!(0.945)), &gbp()), "£0.95");
        assert_eq!(format_money(Money::new(dec!(1.4149)), &gbp()), "£1.41");
        assert_eq!(format_money(Money::new(dec!(-0.945)), &gbp()), "-£0.95");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(
            format_money(Money::new(dec!(1234567.891)), &CurrencyOptions::new("USD", "en-US")),
            "$1,234,567.89"
        );
        assert_eq!(
            format_money(Money::new(dec!(1234.5)), &CurrencyOptions::new("EUR", "fr-FR")),
            "1 234,50 €"
        );
        assert_eq!(format_money(Money::new(dec!(999)), &gbp()), "£999.00");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        assert_eq!(
            format_money(Money::new(dec!(5.03)), &CurrencyOptions::new("CHF", "en-GB")),
            "CHF 5.03"
        );
        assert_eq!(
            format_money(Money::new(dec!(5.03)), &CurrencyOptions::new("CHF", "de-CH")),
            "5,03 CHF"
        );
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_money(Money::new(dec!(-0.001)), &gbp()), "£0.00");
    }
}
