//! Digital invoice review.
//!
//! The review screen lets the user deselect line items (optionally giving a
//! return reason) and change quantities. This module holds that state and
//! writes it back into extractions: `amountToPay` becomes the total of the
//! selected items, deselected rows get quantity zero and their reason id.

mod amount;
mod line_item;

pub use amount::Amount;
pub use line_item::{LineItem, SelectableLineItem};

use tracing::{debug, info};

use crate::error::InvoiceError;
use crate::models::config::InvoiceConfig;
use crate::models::extraction::{
    names, CompoundExtractions, SpecificExtraction, SpecificExtractions,
};
use crate::models::result::CaptureResult;
use crate::models::return_reason::ReturnReason;

/// Result type for digital invoice operations.
pub type Result<T> = std::result::Result<T, InvoiceError>;

/// Review state of an invoice with line items.
#[derive(Debug, Clone)]
pub struct DigitalInvoice {
    specific_extractions: SpecificExtractions,
    compound_extractions: CompoundExtractions,
    items: Vec<SelectableLineItem>,
    default_currency: String,
}

impl DigitalInvoice {
    /// Create a digital invoice with the default configuration.
    pub fn new(
        specific_extractions: SpecificExtractions,
        compound_extractions: CompoundExtractions,
    ) -> Result<Self> {
        Self::with_config(
            specific_extractions,
            compound_extractions,
            &InvoiceConfig::default(),
        )
    }

    /// Create a digital invoice, all line items selected.
    ///
    /// Every row must be priced in the same currency and the full total
    /// must be representable.
    pub fn with_config(
        specific_extractions: SpecificExtractions,
        compound_extractions: CompoundExtractions,
        config: &InvoiceConfig,
    ) -> Result<Self> {
        let rows = compound_extractions
            .get(names::LINE_ITEMS)
            .map(|c| c.specific_extraction_maps.as_slice())
            .filter(|rows| !rows.is_empty())
            .ok_or(InvoiceError::MissingLineItems)?;

        let items = rows
            .iter()
            .map(|row| LineItem::from_row(row, &config.default_currency))
            .map(|item| item.map(SelectableLineItem::new))
            .collect::<Result<Vec<_>>>()?;

        let currency = &items[0].line_item.gross_price.currency;
        if let Some(other) = items
            .iter()
            .map(|i| &i.line_item.gross_price.currency)
            .find(|c| *c != currency)
        {
            return Err(InvoiceError::CurrencyMismatch {
                expected: currency.clone(),
                found: other.clone(),
            });
        }

        let invoice = Self {
            specific_extractions,
            compound_extractions,
            items,
            default_currency: config.default_currency.clone(),
        };
        let total = invoice.total_price()?;

        info!(
            "Loaded digital invoice with {} line items, total {}",
            invoice.items.len(),
            total
        );

        Ok(invoice)
    }

    pub fn line_items(&self) -> &[SelectableLineItem] {
        &self.items
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        let item = self.item_mut(index)?;
        let previous = (item.selected, item.reason.take());
        item.selected = true;

        if let Err(err) = self.total_price() {
            let item = &mut self.items[index];
            (item.selected, item.reason) = previous;
            return Err(err);
        }
        debug!("Selected line item {}", index);
        Ok(())
    }

    pub fn deselect(&mut self, index: usize, reason: Option<ReturnReason>) -> Result<()> {
        let item = self.item_mut(index)?;
        debug!(
            "Deselected line item {} (reason: {})",
            index,
            reason.as_ref().map(|r| r.id.as_str()).unwrap_or("none")
        );
        item.selected = false;
        item.reason = reason;
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<()> {
        if quantity < 1 {
            return Err(InvoiceError::InvalidQuantity(quantity));
        }
        let item = self.item_mut(index)?;
        let previous = std::mem::replace(&mut item.line_item.quantity, quantity);

        if let Err(err) = self.total_price() {
            self.items[index].line_item.quantity = previous;
            return Err(err);
        }
        debug!("Line item {} quantity {} -> {}", index, previous, quantity);
        Ok(())
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|i| i.selected).count()
    }

    pub fn all_selected(&self) -> bool {
        self.items.iter().all(|i| i.selected)
    }

    /// Sum of the selected items' gross totals.
    pub fn total_price(&self) -> Result<Amount> {
        let currency = self
            .items
            .first()
            .map(|i| i.line_item.gross_price.currency.clone())
            .unwrap_or_else(|| self.default_currency.clone());

        self.items
            .iter()
            .filter(|i| i.selected)
            .try_fold(Amount::zero(currency), |total, i| {
                let line = i.line_item.total_gross_price()?;
                total
                    .checked_add(&line)
                    .ok_or_else(|| InvoiceError::Overflow(format!("{} + {}", total, line)))
            })
    }

    /// Specific extractions with `amountToPay` set to the current total.
    pub fn updated_specific_extractions(&self) -> Result<SpecificExtractions> {
        let mut updated = self.specific_extractions.clone();
        let total = self.total_price()?.to_string();

        updated
            .entry(names::AMOUNT_TO_PAY.to_string())
            .and_modify(|e| e.value = total.clone())
            .or_insert_with(|| SpecificExtraction::new(names::AMOUNT_TO_PAY, "amount", total.clone()));

        Ok(updated)
    }

    /// Compound extractions with line item rows reflecting the review.
    pub fn updated_compound_extractions(&self) -> CompoundExtractions {
        let mut updated = self.compound_extractions.clone();

        if let Some(line_items) = updated.get_mut(names::LINE_ITEMS) {
            for (row, item) in line_items
                .specific_extraction_maps
                .iter_mut()
                .zip(&self.items)
            {
                let quantity = if item.selected { item.line_item.quantity } else { 0 };
                set_value(row, names::QUANTITY, "numeric", quantity.to_string());

                match (&item.reason, item.selected) {
                    (Some(reason), false) => {
                        set_value(row, names::RETURN_REASON, "text", reason.id.clone());
                    }
                    _ => {
                        row.remove(names::RETURN_REASON);
                    }
                }
            }
        }

        updated
    }

    /// The result the review screen returns.
    pub fn into_result(self, return_reasons: Vec<ReturnReason>) -> Result<CaptureResult> {
        Ok(CaptureResult::Success {
            specific_extractions: self.updated_specific_extractions()?,
            compound_extractions: self.updated_compound_extractions(),
            return_reasons,
        })
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut SelectableLineItem> {
        self.items
            .get_mut(index)
            .ok_or(InvoiceError::LineItemOutOfRange(index))
    }
}

fn set_value(row: &mut SpecificExtractions, name: &str, entity: &str, value: String) {
    row.entry(name.to_string())
        .and_modify(|e| e.value = value.clone())
        .or_insert_with(|| SpecificExtraction::new(name, entity, value.clone()));
}
