//! Line items read from the `lineItems` compound extraction.

use crate::error::InvoiceError;
use crate::models::extraction::{names, SpecificExtractions};
use crate::models::return_reason::ReturnReason;

use super::amount::Amount;

/// One invoice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    pub gross_price: Amount,
    pub art_number: Option<String>,
}

impl LineItem {
    /// Build a line item from one compound extraction row.
    ///
    /// `baseGross` is required. A missing or blank quantity counts as one.
    pub fn from_row(row: &SpecificExtractions, default_currency: &str) -> Result<Self, InvoiceError> {
        let gross_text = field(row, names::BASE_GROSS).unwrap_or_default();
        let gross_price = Amount::parse(gross_text, default_currency).ok_or_else(|| {
            InvoiceError::InvalidField {
                field: names::BASE_GROSS.to_string(),
                value: gross_text.to_string(),
            }
        })?;

        let quantity = match field(row, names::QUANTITY).filter(|s| !s.is_empty()) {
            Some(text) => parse_quantity(text)?,
            None => 1,
        };

        Ok(Self {
            description: field(row, names::DESCRIPTION).unwrap_or_default().to_string(),
            quantity,
            gross_price,
            art_number: field(row, names::ART_NUMBER)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }

    /// Gross price times quantity.
    pub fn total_gross_price(&self) -> Result<Amount, InvoiceError> {
        self.gross_price
            .checked_mul(self.quantity)
            .ok_or_else(|| InvoiceError::Overflow(format!("{} x {}", self.gross_price, self.quantity)))
    }
}

fn field<'a>(row: &'a SpecificExtractions, name: &str) -> Option<&'a str> {
    row.get(name).map(|e| e.value.trim())
}

// Quantities sometimes arrive as "2.0".
fn parse_quantity(text: &str) -> Result<i64, InvoiceError> {
    let invalid = || InvoiceError::InvalidField {
        field: names::QUANTITY.to_string(),
        value: text.to_string(),
    };

    let whole = match text.split_once(['.', ',']) {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        Some(_) => return Err(invalid()),
        None => text,
    };

    let quantity: i64 = whole.parse().map_err(|_| invalid())?;
    if quantity < 0 {
        return Err(invalid());
    }
    Ok(quantity)
}

/// A line item with its review state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableLineItem {
    pub selected: bool,
    pub reason: Option<ReturnReason>,
    pub line_item: LineItem,
}

impl SelectableLineItem {
    pub fn new(line_item: LineItem) -> Self {
        Self {
            selected: true,
            reason: None,
            line_item,
        }
    }
}
