//! Monetary amounts as they appear on bills and claim forms
//!
//! Amounts reach the system in many shapes: form strings with currency
//! symbols and thousands separators, JSON numbers from inference replies,
//! or exact decimals from the extractors. This module normalizes all of
//! them into a single non-negative `Decimal` using rust_decimal, so
//! comparisons never go through floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Currencies whose symbols and codes are recognized on bills
///
/// No conversion happens between them; the table only tells the
/// extractors which tokens may surround an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    INR,
}

impl Currency {
    /// Every recognized currency
    pub const ALL: [Currency; 5] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::INR,
    ];

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::INR => "₹",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::INR => "INR",
        }
    }

    /// Informal spellings printed on bills in place of the code
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Currency::USD => &["dollars"],
            Currency::EUR => &["euros"],
            Currency::GBP => &["pounds"],
            Currency::JPY => &["yen"],
            Currency::INR => &["Rs.", "Rs", "rupees"],
        }
    }

    /// Word-like tokens (codes and aliases) that may follow or precede an amount
    pub fn word_tokens() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .flat_map(|c| std::iter::once(c.code()).chain(c.aliases().iter().copied()))
            .collect()
    }

    /// Symbol tokens that may precede an amount
    pub fn symbol_tokens() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.symbol()).collect()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An amount in whatever shape it arrived
#[derive(Debug, Clone, PartialEq)]
pub enum RawAmount<'a> {
    /// No value at all
    Missing,
    /// Free text such as `"$1,234.56"`
    Text(Cow<'a, str>),
    /// A floating point number, typically from JSON
    Float(f64),
    /// An already exact decimal
    Exact(Decimal),
}

impl<'a> From<&'a str> for RawAmount<'a> {
    fn from(value: &'a str) -> Self {
        RawAmount::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for RawAmount<'a> {
    fn from(value: &'a String) -> Self {
        RawAmount::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for RawAmount<'static> {
    fn from(value: String) -> Self {
        RawAmount::Text(Cow::Owned(value))
    }
}

impl From<f64> for RawAmount<'static> {
    fn from(value: f64) -> Self {
        RawAmount::Float(value)
    }
}

impl From<i64> for RawAmount<'static> {
    fn from(value: i64) -> Self {
        RawAmount::Exact(Decimal::from(value))
    }
}

impl From<Decimal> for RawAmount<'static> {
    fn from(value: Decimal) -> Self {
        RawAmount::Exact(value)
    }
}

impl<'a, T> From<Option<T>> for RawAmount<'a>
where
    T: Into<RawAmount<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawAmount::Missing)
    }
}

impl<'a> From<&'a Value> for RawAmount<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(s) => RawAmount::Text(Cow::Borrowed(s.as_str())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawAmount::Exact(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    RawAmount::Exact(Decimal::from(u))
                } else {
                    n.as_f64().map(RawAmount::Float).unwrap_or(RawAmount::Missing)
                }
            }
            _ => RawAmount::Missing,
        }
    }
}

/// Normalizes any amount representation into a non-negative decimal
///
/// Text keeps only ASCII digits and decimal points before parsing, so
/// currency symbols, separators and minus signs all disappear. Anything
/// that cannot be parsed, and any non-finite float, becomes zero. This
/// never fails.
pub fn normalize_amount<'a>(value: impl Into<RawAmount<'a>>) -> Decimal {
    match value.into() {
        RawAmount::Missing => Decimal::ZERO,
        RawAmount::Exact(amount) => amount.abs(),
        RawAmount::Float(amount) => Decimal::try_from(amount)
            .map(|d| d.abs())
            .unwrap_or(Decimal::ZERO),
        RawAmount::Text(text) => {
            // A dot only counts as a decimal point when a digit follows it ("Rs. 500")
            let mut chars = text.chars().peekable();
            let mut cleaned = String::with_capacity(text.len());
            while let Some(c) = chars.next() {
                let keep = c.is_ascii_digit()
                    || (c == '.' && chars.peek().is_some_and(|next| next.is_ascii_digit()));
                if keep {
                    cleaned.push(c);
                }
            }
            cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO)
        }
    }
}
