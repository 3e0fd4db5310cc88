//! Configuration structures for result decoding and invoice review.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CapkitError, Result};

/// Main configuration for capkit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapkitConfig {
    /// Output configuration.
    pub output: OutputConfig,

    /// Digital invoice configuration.
    pub invoice: InvoiceConfig,
}

/// How results are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Digital invoice review configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Currency used when an amount carries none.
    pub default_currency: String,

    /// Language for return reason labels.
    pub language: String,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            default_currency: "EUR".to_string(),
            language: "en".to_string(),
        }
    }
}

impl CapkitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CapkitError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| CapkitError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CapkitConfig =
            serde_json::from_str(r#"{"invoice": {"language": "de"}}"#).unwrap();
        assert_eq!(config.invoice.language, "de");
        assert_eq!(config.invoice.default_currency, "EUR");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::TempDir::new().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(CapkitConfig::from_file(&missing), Err(CapkitError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, r#"{"output": {"format": "yaml"}}"#).unwrap();
        let err = CapkitConfig::from_file(&broken).unwrap_err();
        assert!(matches!(err, CapkitError::Config(ref msg) if msg.contains("broken.json")));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CapkitConfig::default();
        config.invoice.default_currency = "CHF".to_string();
        config.save(&path).unwrap();

        assert_eq!(CapkitConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_text_format_name() {
        let config: CapkitConfig =
            serde_json::from_str(r#"{"output": {"format": "text"}}"#).unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
    }
}
