//! Return reasons offered when a line item is deselected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const FALLBACK_LANGUAGE: &str = "en";

/// A reason code with localized labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnReason {
    /// Stable reason code sent back with the extractions.
    pub id: String,

    /// Labels keyed by language code.
    #[serde(default)]
    pub localized_labels: BTreeMap<String, String>,
}

impl ReturnReason {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            localized_labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, language: impl Into<String>, label: impl Into<String>) -> Self {
        self.localized_labels.insert(language.into(), label.into());
        self
    }

    /// Label for `language`, falling back to English, then any label, then the id.
    pub fn label(&self, language: &str) -> &str {
        self.localized_labels
            .get(language)
            .or_else(|| self.localized_labels.get(FALLBACK_LANGUAGE))
            .or_else(|| self.localized_labels.values().next())
            .map(String::as_str)
            .unwrap_or(&self.id)
    }
}

/// Find a reason by id in an ordered list.
pub fn find_reason<'a>(reasons: &'a [ReturnReason], id: &str) -> Option<&'a ReturnReason> {
    reasons.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fallback() {
        let reason = ReturnReason::new("r1")
            .with_label("de", "Falsche Größe")
            .with_label("en", "Wrong size");
        assert_eq!(reason.label("de"), "Falsche Größe");
        assert_eq!(reason.label("fr"), "Wrong size");

        let german_only = ReturnReason::new("r2").with_label("de", "Defekt");
        assert_eq!(german_only.label("fr"), "Defekt");

        assert_eq!(ReturnReason::new("r3").label("en"), "r3");
    }

    #[test]
    fn test_find_reason() {
        let reasons = vec![ReturnReason::new("a"), ReturnReason::new("b")];
        assert_eq!(find_reason(&reasons, "b").map(|r| r.id.as_str()), Some("b"));
        assert!(find_reason(&reasons, "c").is_none());
    }
}
