//! CLI subcommands and the helpers they share.

pub mod config;
pub mod decode;
pub mod invoice;

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tracing::debug;

use capkit_core::models::config::{CapkitConfig, OutputFormat};
use capkit_core::ReturnedResult;

/// Output format flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("capkit")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CapkitConfig> {
    if let Some(path) = config_path {
        return Ok(CapkitConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(CapkitConfig::from_file(&default_path)?)
    } else {
        Ok(CapkitConfig::default())
    }
}

/// Read a returned result from a file, or stdin for `-`.
pub async fn read_returned(input: &Path) -> anyhow::Result<ReturnedResult> {
    let json = if input == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
        tokio::fs::read_to_string(input).await?
    };

    Ok(ReturnedResult::from_json(&json)?)
}

pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

/// Write to a file, or print when no output path is given.
pub async fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, output).await?;
            eprintln!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }
    Ok(())
}
