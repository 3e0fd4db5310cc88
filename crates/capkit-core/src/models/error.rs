//! Errors reported by a capture flow back to the host application.
//!
//! These travel inside a result payload and are surfaced verbatim; they are
//! not failures of this library.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of the capture screen itself.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct CaptureError {
    pub code: CaptureErrorCode,
    #[serde(default)]
    pub message: String,
}

impl CaptureError {
    pub fn new(code: CaptureErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Cause of a capture failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureErrorCode {
    /// The camera could not be opened.
    CameraOpenFailed,
    /// Taking a picture failed.
    CameraShotFailed,
    /// No camera preview was available.
    CameraNoPreview,
    /// Unspecified camera failure.
    CameraUnknown,
    /// An imported document could not be opened.
    OpenDocumentFailed,
    /// Importing a document failed.
    DocumentImport,
    /// Document analysis failed.
    Analysis,
    /// No network connection during upload or analysis.
    NoNetworkConnection,
    /// The SDK was used without being configured.
    MissingCaptureInstance,
}

impl CaptureErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CameraOpenFailed => "camera_open_failed",
            Self::CameraShotFailed => "camera_shot_failed",
            Self::CameraNoPreview => "camera_no_preview",
            Self::CameraUnknown => "camera_unknown",
            Self::OpenDocumentFailed => "open_document_failed",
            Self::DocumentImport => "document_import",
            Self::Analysis => "analysis",
            Self::NoNetworkConnection => "no_network_connection",
            Self::MissingCaptureInstance => "missing_capture_instance",
        }
    }
}

impl fmt::Display for CaptureErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document import validation failure. Either part may be present alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ImportErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportError {
    pub fn new(code: Option<ImportErrorCode>, message: Option<String>) -> Self {
        Self { code, message }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("import failed"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Reason an imported file was rejected.
///
/// Codes this library does not know are kept verbatim in [`ImportErrorCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImportErrorCode {
    TypeNotSupported,
    FileSizeTooLarge,
    PdfTooManyPages,
    PasswordProtectedPdf,
    TooManyDocumentPages,
    MixedDocumentsUnsupported,
    Unknown(String),
}

impl ImportErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::TypeNotSupported => "type_not_supported",
            Self::FileSizeTooLarge => "file_size_too_large",
            Self::PdfTooManyPages => "pdf_too_many_pages",
            Self::PasswordProtectedPdf => "password_protected_pdf",
            Self::TooManyDocumentPages => "too_many_document_pages",
            Self::MixedDocumentsUnsupported => "mixed_documents_unsupported",
            Self::Unknown(code) => code,
        }
    }

    /// Parse a wire code; never fails.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "type_not_supported" => Self::TypeNotSupported,
            "file_size_too_large" => Self::FileSizeTooLarge,
            "pdf_too_many_pages" => Self::PdfTooManyPages,
            "password_protected_pdf" => Self::PasswordProtectedPdf,
            "too_many_document_pages" => Self::TooManyDocumentPages,
            "mixed_documents_unsupported" => Self::MixedDocumentsUnsupported,
            _ => Self::Unknown(code.to_string()),
        }
    }
}

impl From<String> for ImportErrorCode {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<ImportErrorCode> for String {
    fn from(code: ImportErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ImportErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_code_parsing() {
        assert_eq!(
            ImportErrorCode::from_code("PDF_TOO_MANY_PAGES"),
            ImportErrorCode::PdfTooManyPages
        );
        assert_eq!(
            ImportErrorCode::from_code("quota_exceeded"),
            ImportErrorCode::Unknown("quota_exceeded".to_string())
        );
    }

    #[test]
    fn test_unknown_import_code_survives_serde() {
        let code = ImportErrorCode::Unknown("QUOTA".to_string());
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"QUOTA\"");
        let back: ImportErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn test_error_display() {
        let err = CaptureError::new(CaptureErrorCode::CameraOpenFailed, "busy");
        assert_eq!(err.to_string(), "camera_open_failed: busy");

        let import = ImportError::new(None, Some("too big".to_string()));
        assert_eq!(import.to_string(), "too big");
        assert_eq!(ImportError::default().to_string(), "import failed");
    }
}
