//! Extraction records produced by document analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Specific extractions keyed by extraction name.
pub type SpecificExtractions = BTreeMap<String, SpecificExtraction>;

/// Compound extractions keyed by extraction name.
pub type CompoundExtractions = BTreeMap<String, CompoundExtraction>;

/// Well-known extraction names.
pub mod names {
    pub const AMOUNT_TO_PAY: &str = "amountToPay";
    pub const BIC: &str = "bic";
    pub const IBAN: &str = "iban";
    pub const PAYMENT_REFERENCE: &str = "paymentReference";
    pub const PAYMENT_RECIPIENT: &str = "paymentRecipient";
    pub const EPS_PAYMENT_QR_CODE_URL: &str = "epsPaymentQRCodeUrl";

    pub const LINE_ITEMS: &str = "lineItems";
    pub const DESCRIPTION: &str = "description";
    pub const QUANTITY: &str = "quantity";
    pub const BASE_GROSS: &str = "baseGross";
    pub const ART_NUMBER: &str = "artNumber";
    pub const RETURN_REASON: &str = "returnReason";
}

/// Location of an extraction on a document page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub page: u32,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Alternative value proposed for a specific extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub entity: String,
    pub value: String,
    #[serde(default, rename = "box", skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// A single-valued field extracted from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificExtraction {
    /// Extraction name (e.g. `iban`).
    pub name: String,

    /// Entity type of the value (e.g. `amount`, `text`).
    pub entity: String,

    /// Extracted value as reported by the analysis backend.
    pub value: String,

    /// Where the value was found.
    #[serde(default, rename = "box", skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Other values the user may pick instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
}

impl SpecificExtraction {
    pub fn new(
        name: impl Into<String>,
        entity: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entity: entity.into(),
            value: value.into(),
            bounding_box: None,
            candidates: Vec::new(),
        }
    }

    pub fn with_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}

/// A group-valued field, e.g. the rows of a line item table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompoundExtraction {
    pub name: String,

    /// One map of specific extractions per row.
    pub specific_extraction_maps: Vec<SpecificExtractions>,
}

impl CompoundExtraction {
    pub fn new(name: impl Into<String>, rows: Vec<SpecificExtractions>) -> Self {
        Self {
            name: name.into(),
            specific_extraction_maps: rows,
        }
    }
}

/// Build a specific extraction map from a list of extractions, keyed by name.
pub fn specific_map<I>(extractions: I) -> SpecificExtractions
where
    I: IntoIterator<Item = SpecificExtraction>,
{
    extractions
        .into_iter()
        .map(|e| (e.name.clone(), e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_map_keys_by_name() {
        let map = specific_map([
            SpecificExtraction::new(names::IBAN, "iban", "AT611904300234573201"),
            SpecificExtraction::new(names::BIC, "bic", "BKAUATWW"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[names::BIC].value, "BKAUATWW");
    }

    #[test]
    fn test_box_serializes_under_short_name() {
        let extraction = SpecificExtraction::new(names::IBAN, "iban", "AT61")
            .with_box(BoundingBox { page: 1, left: 0.1, top: 0.2, width: 0.3, height: 0.05 });
        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(json["box"]["page"], 1);
        assert!(json.get("candidates").is_none());
    }
}
