//! Core library for capture result decoding.
//!
//! This crate provides:
//! - The result payload boundary (status code, tagged key/value payload, JSON form)
//! - Classification of a returned result into success, empty, cancel or error
//! - Digital invoice review (line item selection, return reasons, totals)
//! - Configuration and error types shared with the CLI

pub mod error;
pub mod models;
pub mod payload;
pub mod decoder;
pub mod digital_invoice;

pub use error::{CapkitError, InvoiceError, PayloadError, Result};
pub use models::{
    CaptureError, CaptureErrorCode, CaptureResult, CompoundExtraction, CompoundExtractions,
    ErrorCause, ImportError, ImportErrorCode, ReturnReason, SpecificExtraction,
    SpecificExtractions,
};
pub use payload::{encode, PayloadValue, ResultPayload, ReturnedResult, StatusCode};
pub use decoder::{decode, CaptureResultDecoder, ResultDecoder};
pub use digital_invoice::{Amount, DigitalInvoice, LineItem, SelectableLineItem};
