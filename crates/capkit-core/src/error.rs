//! Error types for the capkit-core library.
//!
//! These are failures of the library itself (malformed payload files,
//! invalid digital invoice edits, configuration). Errors reported *by* a
//! capture flow are data, see [`crate::models::error`].

use thiserror::Error;

/// Error type for file-backed operations such as loading configuration.
#[derive(Error, Debug)]
pub enum CapkitError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the result payload boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The serialized result could not be parsed.
    #[error("malformed result payload: {0}")]
    Malformed(String),

    /// A well-known key carries a value of the wrong kind.
    #[error("key {key} holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Errors related to digital invoice review.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvoiceError {
    /// The extractions carry no line items.
    #[error("no line items in compound extractions")]
    MissingLineItems,

    /// Line item index does not exist.
    #[error("line item index out of range: {0}")]
    LineItemOutOfRange(usize),

    /// A line item field is missing or could not be parsed.
    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: String, value: String },

    /// Quantity is not a positive integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Line items are priced in different currencies.
    #[error("line items mix currencies: {expected} and {found}")]
    CurrencyMismatch { expected: String, found: String },

    /// A line total or the invoice total does not fit in a decimal.
    #[error("amount overflow: {0}")]
    Overflow(String),
}

/// Result type for file-backed operations.
pub type Result<T> = std::result::Result<T, CapkitError>;
