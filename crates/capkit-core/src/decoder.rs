//! Capture result decoding.
//!
//! Classifies a returned status and payload into exactly one
//! [`CaptureResult`]:
//!
//! - not success: capture error, else import error, else cancel
//! - success: a specific-extraction map holding at least one payment
//!   indicator is a success, anything else is empty
//!
//! Decoding is pure and never fails; missing or mistyped data degrades to
//! [`CaptureResult::Empty`] or [`CaptureResult::Cancel`].

use tracing::debug;

use crate::models::error::ImportError;
use crate::models::extraction::{names, SpecificExtractions};
use crate::models::result::CaptureResult;
use crate::payload::{ResultPayload, StatusCode};

/// Extractions that each mark an invoice as payable.
pub const PAY5_KEYS: [&str; 5] = [
    names::AMOUNT_TO_PAY,
    names::BIC,
    names::IBAN,
    names::PAYMENT_REFERENCE,
    names::PAYMENT_RECIPIENT,
];

/// At least one pay5 field is present. Partial data is enough.
pub fn is_pay5_complete(extractions: &SpecificExtractions) -> bool {
    PAY5_KEYS.iter().any(|key| extractions.contains_key(*key))
}

/// The EPS payment QR code URL is present.
pub fn has_eps_payment(extractions: &SpecificExtractions) -> bool {
    extractions.contains_key(names::EPS_PAYMENT_QR_CODE_URL)
}

/// Trait for capture result decoders.
pub trait ResultDecoder {
    /// Classify a status and optional payload.
    fn decode(&self, status: StatusCode, payload: Option<&ResultPayload>) -> CaptureResult;
}

/// Default decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureResultDecoder;

impl CaptureResultDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_failure(&self, payload: Option<&ResultPayload>) -> CaptureResult {
        let Some(payload) = payload else {
            debug!("No payload with non-success status, treating as cancel");
            return CaptureResult::Cancel;
        };

        if let Some(error) = payload.capture_error() {
            debug!("Capture error: {}", error);
            return CaptureResult::capture_error(error.clone());
        }

        let code = payload.import_error_code();
        let message = payload.import_error_message().map(str::to_string);
        if code.is_some() || message.is_some() {
            let error = ImportError::new(code, message);
            debug!("Import error: {}", error);
            return CaptureResult::import_error(error);
        }

        debug!("No error indicator with non-success status, treating as cancel");
        CaptureResult::Cancel
    }

    fn decode_success(&self, payload: Option<&ResultPayload>) -> CaptureResult {
        let Some(specific) = payload.and_then(ResultPayload::specific_extractions) else {
            debug!("No specific extractions, result is empty");
            return CaptureResult::Empty;
        };

        if !is_pay5_complete(specific) && !has_eps_payment(specific) {
            debug!(
                "None of {} specific extractions is a payment indicator, result is empty",
                specific.len()
            );
            return CaptureResult::Empty;
        }

        let compound = payload
            .and_then(ResultPayload::compound_extractions)
            .cloned()
            .unwrap_or_default();
        let reasons = payload
            .and_then(ResultPayload::return_reasons)
            .map(<[_]>::to_vec)
            .unwrap_or_default();

        debug!(
            "Decoded {} specific, {} compound extractions and {} return reasons",
            specific.len(),
            compound.len(),
            reasons.len()
        );

        CaptureResult::Success {
            specific_extractions: specific.clone(),
            compound_extractions: compound,
            return_reasons: reasons,
        }
    }
}

impl ResultDecoder for CaptureResultDecoder {
    fn decode(&self, status: StatusCode, payload: Option<&ResultPayload>) -> CaptureResult {
        if status.is_success() {
            self.decode_success(payload)
        } else {
            self.decode_failure(payload)
        }
    }
}

/// Decode with the default decoder.
pub fn decode(status: StatusCode, payload: Option<&ResultPayload>) -> CaptureResult {
    CaptureResultDecoder.decode(status, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::{CaptureError, CaptureErrorCode, ImportErrorCode};
    use crate::models::extraction::{
        specific_map, CompoundExtraction, CompoundExtractions, SpecificExtraction,
    };
    use crate::models::result::ErrorCause;
    use crate::models::return_reason::ReturnReason;
    use crate::payload::{keys, PayloadValue};
    use pretty_assertions::assert_eq;

    fn extraction(name: &str, value: &str) -> SpecificExtraction {
        SpecificExtraction::new(name, "text", value)
    }

    fn specific(names: &[&str]) -> PayloadValue {
        PayloadValue::SpecificExtractions(specific_map(
            names.iter().map(|n| extraction(n, "value")),
        ))
    }

    fn capture_error() -> CaptureError {
        CaptureError::new(CaptureErrorCode::CameraShotFailed, "shutter")
    }

    fn text(value: &str) -> PayloadValue {
        PayloadValue::Text(value.to_string())
    }

    #[test]
    fn test_capture_error_wins_over_everything() {
        let payload = ResultPayload::new()
            .with(keys::CAPTURE_ERROR, PayloadValue::CaptureError(capture_error()))
            .with(keys::IMPORT_ERROR_CODE, text("type_not_supported"))
            .with(keys::SPECIFIC_EXTRACTIONS, specific(&[names::IBAN]));

        for status in [StatusCode::CANCELED, StatusCode::ERROR, StatusCode(7)] {
            assert_eq!(
                decode(status, Some(&payload)),
                CaptureResult::capture_error(capture_error())
            );
        }
    }

    #[test]
    fn test_import_error_code_and_message() {
        let payload = ResultPayload::new()
            .with(keys::IMPORT_ERROR_CODE, text("file_size_too_large"))
            .with(keys::IMPORT_ERROR_MESSAGE, text("max 10 MB"));

        let result = decode(StatusCode::ERROR, Some(&payload));
        assert_eq!(
            result,
            CaptureResult::import_error(ImportError::new(
                Some(ImportErrorCode::FileSizeTooLarge),
                Some("max 10 MB".to_string()),
            ))
        );
    }

    #[test]
    fn test_import_error_message_alone() {
        let payload = ResultPayload::new().with(keys::IMPORT_ERROR_MESSAGE, text("broken file"));

        match decode(StatusCode::CANCELED, Some(&payload)) {
            CaptureResult::Error {
                cause: ErrorCause::Import { error },
            } => {
                assert_eq!(error.code, None);
                assert_eq!(error.message.as_deref(), Some("broken file"));
            }
            other => panic!("expected import error, got {:?}", other),
        }
    }

    #[test]
    fn test_import_error_code_alone() {
        let payload = ResultPayload::new().with(keys::IMPORT_ERROR_CODE, text("pdf_too_many_pages"));
        assert_eq!(
            decode(StatusCode::ERROR, Some(&payload)),
            CaptureResult::import_error(ImportError::new(Some(ImportErrorCode::PdfTooManyPages), None))
        );
    }

    #[test]
    fn test_failure_without_indicators_is_cancel() {
        assert_eq!(decode(StatusCode::CANCELED, None), CaptureResult::Cancel);
        assert_eq!(
            decode(StatusCode::CANCELED, Some(&ResultPayload::new())),
            CaptureResult::Cancel
        );

        // Extractions don't matter without a success status.
        let payload = ResultPayload::new().with(keys::SPECIFIC_EXTRACTIONS, specific(&[names::IBAN]));
        assert_eq!(decode(StatusCode::ERROR, Some(&payload)), CaptureResult::Cancel);
    }

    #[test]
    fn test_mistyped_capture_error_is_cancel() {
        let payload = ResultPayload::new().with(keys::CAPTURE_ERROR, text("camera broke"));
        assert_eq!(decode(StatusCode::ERROR, Some(&payload)), CaptureResult::Cancel);
    }

    #[test]
    fn test_success_without_specific_extractions_is_empty() {
        assert_eq!(decode(StatusCode::OK, None), CaptureResult::Empty);

        let reasons = PayloadValue::ReturnReasons(vec![ReturnReason::new("r1")]);
        let payload = ResultPayload::new().with(keys::RETURN_REASONS, reasons);
        assert_eq!(decode(StatusCode::OK, Some(&payload)), CaptureResult::Empty);
    }

    #[test]
    fn test_success_without_payment_indicator_is_empty() {
        let payload = ResultPayload::new()
            .with(keys::SPECIFIC_EXTRACTIONS, specific(&["docType", "senderName"]))
            .with(keys::RETURN_REASONS, PayloadValue::ReturnReasons(vec![ReturnReason::new("r1")]));
        assert_eq!(decode(StatusCode::OK, Some(&payload)), CaptureResult::Empty);
    }

    #[test]
    fn test_present_but_empty_specific_extractions_is_empty() {
        let payload = ResultPayload::new().with(keys::SPECIFIC_EXTRACTIONS, specific(&[]));
        assert_eq!(decode(StatusCode::OK, Some(&payload)), CaptureResult::Empty);
    }

    #[test]
    fn test_each_pay5_field_alone_is_enough() {
        for key in PAY5_KEYS {
            let payload = ResultPayload::new().with(keys::SPECIFIC_EXTRACTIONS, specific(&[key]));
            assert!(
                decode(StatusCode::OK, Some(&payload)).is_success(),
                "{} alone should be payable",
                key
            );
        }
    }

    #[test]
    fn test_iban_only_defaults_compound_and_reasons() {
        let payload = ResultPayload::new().with(keys::SPECIFIC_EXTRACTIONS, specific(&[names::IBAN]));

        assert_eq!(
            decode(StatusCode::OK, Some(&payload)),
            CaptureResult::Success {
                specific_extractions: specific_map([extraction(names::IBAN, "value")]),
                compound_extractions: CompoundExtractions::new(),
                return_reasons: Vec::new(),
            }
        );
    }

    #[test]
    fn test_eps_url_alone_is_success() {
        let url = "https://eps.example.at/qr/123";
        let payload = ResultPayload::new().with(
            keys::SPECIFIC_EXTRACTIONS,
            PayloadValue::SpecificExtractions(specific_map([extraction(
                names::EPS_PAYMENT_QR_CODE_URL,
                url,
            )])),
        );

        match decode(StatusCode::OK, Some(&payload)) {
            CaptureResult::Success {
                specific_extractions,
                compound_extractions,
                return_reasons,
            } => {
                assert_eq!(specific_extractions[names::EPS_PAYMENT_QR_CODE_URL].value, url);
                assert!(compound_extractions.is_empty());
                assert!(return_reasons.is_empty());
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_success_keeps_reason_order_and_compound() {
        let reasons = vec![ReturnReason::new("z"), ReturnReason::new("a"), ReturnReason::new("m")];
        let mut compound = CompoundExtractions::new();
        compound.insert(
            names::LINE_ITEMS.to_string(),
            CompoundExtraction::new(names::LINE_ITEMS, vec![specific_map([extraction("description", "Hat")])]),
        );

        let payload = ResultPayload::new()
            .with(keys::SPECIFIC_EXTRACTIONS, specific(&[names::AMOUNT_TO_PAY]))
            .with(keys::COMPOUND_EXTRACTIONS, PayloadValue::CompoundExtractions(compound.clone()))
            .with(keys::RETURN_REASONS, PayloadValue::ReturnReasons(reasons.clone()));

        match decode(StatusCode::OK, Some(&payload)) {
            CaptureResult::Success {
                compound_extractions,
                return_reasons,
                ..
            } => {
                assert_eq!(compound_extractions, compound);
                assert_eq!(return_reasons, reasons);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_trait_object_decoder() {
        let decoder: Box<dyn ResultDecoder> = Box::new(CaptureResultDecoder::new());
        assert_eq!(decoder.decode(StatusCode::CANCELED, None), CaptureResult::Cancel);
    }
}
