//! Status and payload pair handed back by a capture screen.

use serde::{Deserialize, Serialize};

use super::{keys, PayloadValue, ResultPayload, StatusCode};
use crate::decoder;
use crate::error::PayloadError;
use crate::models::result::{CaptureResult, ErrorCause};

/// What a producing screen returns: a status and an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedResult {
    pub status: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ResultPayload>,
}

impl ReturnedResult {
    pub fn new(status: StatusCode, payload: Option<ResultPayload>) -> Self {
        Self { status, payload }
    }

    /// Parse a returned result from JSON.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Classify into a typed outcome.
    pub fn decode(&self) -> CaptureResult {
        decoder::decode(self.status, self.payload.as_ref())
    }
}

impl From<&CaptureResult> for ReturnedResult {
    fn from(result: &CaptureResult) -> Self {
        encode(result)
    }
}

/// Encode a typed outcome the way a producing screen would return it.
pub fn encode(result: &CaptureResult) -> ReturnedResult {
    match result {
        CaptureResult::Success {
            specific_extractions,
            compound_extractions,
            return_reasons,
        } => {
            let payload = ResultPayload::new()
                .with(
                    keys::SPECIFIC_EXTRACTIONS,
                    PayloadValue::SpecificExtractions(specific_extractions.clone()),
                )
                .with(
                    keys::COMPOUND_EXTRACTIONS,
                    PayloadValue::CompoundExtractions(compound_extractions.clone()),
                )
                .with(
                    keys::RETURN_REASONS,
                    PayloadValue::ReturnReasons(return_reasons.clone()),
                );
            ReturnedResult::new(StatusCode::OK, Some(payload))
        }
        CaptureResult::Empty => ReturnedResult::new(StatusCode::OK, Some(ResultPayload::new())),
        CaptureResult::Cancel => ReturnedResult::new(StatusCode::CANCELED, None),
        CaptureResult::Error { cause } => {
            let mut payload = ResultPayload::new();
            match cause {
                ErrorCause::Capture { error } => {
                    payload.insert(keys::CAPTURE_ERROR, PayloadValue::CaptureError(error.clone()));
                }
                ErrorCause::Import { error } => {
                    if let Some(code) = &error.code {
                        payload.insert(
                            keys::IMPORT_ERROR_CODE,
                            PayloadValue::Text(code.as_str().to_string()),
                        );
                    }
                    if let Some(message) = &error.message {
                        payload.insert(keys::IMPORT_ERROR_MESSAGE, PayloadValue::Text(message.clone()));
                    }
                }
            }
            ReturnedResult::new(StatusCode::ERROR, Some(payload))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::{CaptureError, CaptureErrorCode, ImportError, ImportErrorCode};
    use crate::models::extraction::{
        names, specific_map, CompoundExtraction, CompoundExtractions, SpecificExtraction,
    };
    use crate::models::return_reason::ReturnReason;
    use pretty_assertions::assert_eq;

    fn success() -> CaptureResult {
        let row = specific_map([
            SpecificExtraction::new(names::DESCRIPTION, "text", "Shirt"),
            SpecificExtraction::new(names::QUANTITY, "numeric", "2"),
            SpecificExtraction::new(names::BASE_GROSS, "amount", "19.99:EUR"),
        ]);
        let mut compound = CompoundExtractions::new();
        compound.insert(
            names::LINE_ITEMS.to_string(),
            CompoundExtraction::new(names::LINE_ITEMS, vec![row]),
        );

        CaptureResult::Success {
            specific_extractions: specific_map([
                SpecificExtraction::new(names::IBAN, "iban", "DE89370400440532013000"),
                SpecificExtraction::new(names::AMOUNT_TO_PAY, "amount", "39.98:EUR"),
            ]),
            compound_extractions: compound,
            return_reasons: vec![
                ReturnReason::new("r2").with_label("en", "Too big"),
                ReturnReason::new("r1").with_label("en", "Damaged"),
            ],
        }
    }

    #[test]
    fn test_success_survives_json() {
        let original = success();
        let json = encode(&original).to_json().unwrap();
        let decoded = ReturnedResult::from_json(&json).unwrap().decode();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_every_outcome_decodes_to_itself() {
        let outcomes = vec![
            CaptureResult::Empty,
            CaptureResult::Cancel,
            CaptureResult::capture_error(CaptureError::new(CaptureErrorCode::Analysis, "timeout")),
            CaptureResult::import_error(ImportError::new(
                Some(ImportErrorCode::PasswordProtectedPdf),
                None,
            )),
            CaptureResult::import_error(ImportError::new(None, Some("unreadable".to_string()))),
        ];
        for outcome in outcomes {
            assert_eq!(ReturnedResult::from(&outcome).decode(), outcome);
        }
    }

    #[test]
    fn test_cancel_has_no_payload() {
        let returned = encode(&CaptureResult::Cancel);
        assert_eq!(returned.status, StatusCode::CANCELED);
        assert!(returned.payload.is_none());
        assert_eq!(returned.to_json().unwrap(), r#"{"status":0}"#);
    }

    #[test]
    fn test_malformed_json() {
        let err = ReturnedResult::from_json("{\"status\": \"ok\"}").unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }
}
