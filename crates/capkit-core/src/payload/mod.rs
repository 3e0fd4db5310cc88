//! Result payload boundary.
//!
//! A capture screen returns a status code and a flat, string-keyed payload.
//! Values are tagged with their kind so the boundary can be checked before
//! anything downstream sees it; [`crate::decoder`] turns it into a
//! [`CaptureResult`](crate::models::CaptureResult).

mod returned;

pub use returned::{encode, ReturnedResult};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PayloadError;
use crate::models::error::{CaptureError, ImportErrorCode};
use crate::models::extraction::{CompoundExtractions, SpecificExtractions};
use crate::models::return_reason::ReturnReason;

/// Wire keys of the result payload.
pub mod keys {
    pub const CAPTURE_ERROR: &str = "capture_error";
    pub const IMPORT_ERROR_CODE: &str = "import_error_code";
    pub const IMPORT_ERROR_MESSAGE: &str = "import_error_message";
    pub const SPECIFIC_EXTRACTIONS: &str = "specific_extractions";
    pub const COMPOUND_EXTRACTIONS: &str = "compound_extractions";
    pub const RETURN_REASONS: &str = "return_reasons";

    /// Every well-known key. Keys must be pairwise distinct.
    pub const ALL: [&str; 6] = [
        CAPTURE_ERROR,
        IMPORT_ERROR_CODE,
        IMPORT_ERROR_MESSAGE,
        SPECIFIC_EXTRACTIONS,
        COMPOUND_EXTRACTIONS,
        RETURN_REASONS,
    ];
}

/// Status code a screen finishes with.
///
/// Only [`StatusCode::OK`] counts as success; any other value is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(-1);
    pub const CANCELED: StatusCode = StatusCode(0);
    pub const ERROR: StatusCode = StatusCode(2);

    pub fn is_success(self) -> bool {
        self == Self::OK
    }
}

/// A single payload value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PayloadValue {
    Text(String),
    CaptureError(CaptureError),
    SpecificExtractions(SpecificExtractions),
    CompoundExtractions(CompoundExtractions),
    ReturnReasons(Vec<ReturnReason>),
}

impl PayloadValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::CaptureError(_) => "capture_error",
            Self::SpecificExtractions(_) => "specific_extractions",
            Self::CompoundExtractions(_) => "compound_extractions",
            Self::ReturnReasons(_) => "return_reasons",
        }
    }
}

/// The kind each well-known key must hold.
fn expected_kind(key: &str) -> Option<&'static str> {
    match key {
        keys::CAPTURE_ERROR => Some("capture_error"),
        keys::IMPORT_ERROR_CODE | keys::IMPORT_ERROR_MESSAGE => Some("text"),
        keys::SPECIFIC_EXTRACTIONS => Some("specific_extractions"),
        keys::COMPOUND_EXTRACTIONS => Some("compound_extractions"),
        keys::RETURN_REASONS => Some("return_reasons"),
        _ => None,
    }
}

/// Flat key/value payload returned by a capture screen.
///
/// Typed accessors never fail: a value of the wrong kind reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultPayload {
    entries: BTreeMap<String, PayloadValue>,
}

impl ResultPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PayloadValue) -> Option<PayloadValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn with(mut self, key: impl Into<String>, value: PayloadValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn capture_error(&self) -> Option<&CaptureError> {
        match self.typed(keys::CAPTURE_ERROR)? {
            PayloadValue::CaptureError(error) => Some(error),
            _ => None,
        }
    }

    pub fn import_error_code(&self) -> Option<ImportErrorCode> {
        self.text(keys::IMPORT_ERROR_CODE).map(ImportErrorCode::from_code)
    }

    pub fn import_error_message(&self) -> Option<&str> {
        self.text(keys::IMPORT_ERROR_MESSAGE)
    }

    pub fn specific_extractions(&self) -> Option<&SpecificExtractions> {
        match self.typed(keys::SPECIFIC_EXTRACTIONS)? {
            PayloadValue::SpecificExtractions(map) => Some(map),
            _ => None,
        }
    }

    pub fn compound_extractions(&self) -> Option<&CompoundExtractions> {
        match self.typed(keys::COMPOUND_EXTRACTIONS)? {
            PayloadValue::CompoundExtractions(map) => Some(map),
            _ => None,
        }
    }

    pub fn return_reasons(&self) -> Option<&[ReturnReason]> {
        match self.typed(keys::RETURN_REASONS)? {
            PayloadValue::ReturnReasons(reasons) => Some(reasons),
            _ => None,
        }
    }

    /// Check well-known keys for values of the wrong kind.
    pub fn validate(&self) -> Vec<PayloadError> {
        keys::ALL
            .iter()
            .filter_map(|key| {
                let value = self.entries.get(*key)?;
                let expected = expected_kind(key)?;
                (value.kind() != expected).then(|| PayloadError::TypeMismatch {
                    key: (*key).to_string(),
                    expected,
                    found: value.kind(),
                })
            })
            .collect()
    }

    fn text(&self, key: &str) -> Option<&str> {
        match self.typed(key)? {
            PayloadValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a well-known key, dropping values of the wrong kind.
    fn typed(&self, key: &str) -> Option<&PayloadValue> {
        let value = self.entries.get(key)?;
        match expected_kind(key) {
            Some(expected) if value.kind() != expected => {
                warn!("Ignoring {}: holds {}, expected {}", key, value.kind(), expected);
                None
            }
            _ => Some(value),
        }
    }
}
