//! Data models for capture results.

pub mod config;
pub mod error;
pub mod extraction;
pub mod result;
pub mod return_reason;

pub use config::{CapkitConfig, InvoiceConfig, OutputConfig, OutputFormat};
pub use error::{CaptureError, CaptureErrorCode, ImportError, ImportErrorCode};
pub use extraction::{
    BoundingBox, Candidate, CompoundExtraction, CompoundExtractions, SpecificExtraction,
    SpecificExtractions,
};
pub use result::{CaptureResult, ErrorCause};
pub use return_reason::ReturnReason;
