//! Amounts in the extraction wire form `"24.99:EUR"`.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

lazy_static! {
    // Value with optional ":CUR" suffix. Comma decimal separator is accepted.
    static ref AMOUNT_VALUE: Regex = Regex::new(
        r"^\s*(-?\d+)(?:[.,](\d+))?\s*(?::\s*([A-Za-z]{3}))?\s*$"
    ).unwrap();
}

/// A monetary amount with its currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    pub value: Decimal,
    pub currency: String,
}

impl Amount {
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parse `"24.99:EUR"`, `"24,99"` or `"24"`; `default_currency` fills a missing suffix.
    pub fn parse(text: &str, default_currency: &str) -> Option<Self> {
        let caps = AMOUNT_VALUE.captures(text)?;
        let value = match caps.get(2) {
            Some(fraction) => format!("{}.{}", &caps[1], fraction.as_str()),
            None => caps[1].to_string(),
        };
        let value = Decimal::from_str(&value).ok()?;
        let currency = caps
            .get(3)
            .map(|c| c.as_str().to_uppercase())
            .unwrap_or_else(|| default_currency.to_string());

        Some(Self::new(value, currency))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self
            .value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        write!(f, "{}:{}", value, self.currency)
    }
}

impl Amount {
    /// Multiply by a quantity; `None` on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Option<Amount> {
        let value = self.value.checked_mul(Decimal::from(quantity))?;
        Some(Amount::new(value, self.currency.clone()))
    }

    /// Add another amount of the same currency; `None` on overflow or currency mismatch.
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        if self.currency != other.currency {
            return None;
        }
        let value = self.value.checked_add(other.value)?;
        Some(Amount::new(value, self.currency.clone()))
    }
}
