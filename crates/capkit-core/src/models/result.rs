//! Typed outcome of a capture flow.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CaptureError, ImportError};
use super::extraction::{CompoundExtractions, SpecificExtractions};
use super::return_reason::ReturnReason;

/// What a capture flow produced. Exactly one variant per returned result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaptureResult {
    /// Extractions with at least one payment indicator.
    Success {
        specific_extractions: SpecificExtractions,
        compound_extractions: CompoundExtractions,
        return_reasons: Vec<ReturnReason>,
    },
    /// The flow finished but nothing payable was extracted.
    Empty,
    /// The user left the flow.
    Cancel,
    /// The flow failed.
    Error { cause: ErrorCause },
}

/// Why a capture flow failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCause {
    Capture { error: CaptureError },
    Import { error: ImportError },
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture { error } => write!(f, "capture error: {}", error),
            Self::Import { error } => write!(f, "import error: {}", error),
        }
    }
}

impl CaptureResult {
    pub fn capture_error(error: CaptureError) -> Self {
        Self::Error {
            cause: ErrorCause::Capture { error },
        }
    }

    pub fn import_error(error: ImportError) -> Self {
        Self::Error {
            cause: ErrorCause::Import { error },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Empty => "empty",
            Self::Cancel => "cancel",
            Self::Error { .. } => "error",
        }
    }
}
