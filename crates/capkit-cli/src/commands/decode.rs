//! Decode command - classify a returned result.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use capkit_core::models::config::{CapkitConfig, OutputFormat};
use capkit_core::{CaptureResult, StatusCode};

use super::{emit, load_config, read_returned, to_json, FormatArg};

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// Returned result JSON file (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Override the status code from the file (-1 = ok, 0 = canceled)
    #[arg(short, long, allow_hyphen_values = true)]
    status: Option<i32>,

    /// Output format (default from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report payload values of the wrong kind
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: DecodeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut returned = read_returned(&args.input).await?;
    if let Some(status) = args.status {
        returned.status = StatusCode(status);
    }

    if args.strict {
        let issues = returned
            .payload
            .as_ref()
            .map(|p| p.validate())
            .unwrap_or_default();
        if !issues.is_empty() {
            eprintln!("{}", style("Payload issues:").yellow());
            for issue in &issues {
                warn!("{}", issue);
                eprintln!("  - {}", issue);
            }
        }
    }

    let result = returned.decode();
    info!("Decoded {} as {}", args.input.display(), result.kind());

    let output = format_result(&result, &config, args.format)?;
    emit(&output, args.output.as_deref()).await
}

fn format_result(
    result: &CaptureResult,
    config: &CapkitConfig,
    format: Option<FormatArg>,
) -> anyhow::Result<String> {
    let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
    match format {
        OutputFormat::Json => to_json(result, config.output.pretty),
        OutputFormat::Text => Ok(format_text(result, &config.invoice.language)),
    }
}

fn format_text(result: &CaptureResult, language: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Outcome: {}\n", result.kind()));

    match result {
        CaptureResult::Success {
            specific_extractions,
            compound_extractions,
            return_reasons,
        } => {
            output.push_str(&format!("\nSpecific extractions ({}):\n", specific_extractions.len()));
            for (name, extraction) in specific_extractions {
                output.push_str(&format!("  {}: {}\n", name, extraction.value));
            }

            if !compound_extractions.is_empty() {
                output.push_str("\nCompound extractions:\n");
                for (name, compound) in compound_extractions {
                    output.push_str(&format!(
                        "  {}: {} rows\n",
                        name,
                        compound.specific_extraction_maps.len()
                    ));
                }
            }

            if !return_reasons.is_empty() {
                output.push_str("\nReturn reasons:\n");
                for reason in return_reasons {
                    output.push_str(&format!("  {}: {}\n", reason.id, reason.label(language)));
                }
            }
        }
        CaptureResult::Error { cause } => {
            output.push_str(&format!("Cause: {}\n", cause));
        }
        CaptureResult::Empty | CaptureResult::Cancel => {}
    }

    output.trim_end().to_string()
}
