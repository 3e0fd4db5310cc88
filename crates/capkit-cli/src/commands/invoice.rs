//! Invoice command - review line items of a successful result.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use capkit_core::models::config::OutputFormat;
use capkit_core::models::return_reason::find_reason;
use capkit_core::{encode, CaptureResult, DigitalInvoice, ReturnReason};

use super::{emit, load_config, read_returned, to_json, FormatArg};

/// Arguments for the invoice command.
#[derive(Args)]
pub struct InvoiceArgs {
    /// Returned result JSON file (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Deselect a line item, optionally with a return reason id (e.g. `2=damaged`)
    #[arg(short, long, value_name = "LINE[=REASON]")]
    deselect: Vec<String>,

    /// Change a line item quantity (e.g. `1=3`)
    #[arg(short, long, value_name = "LINE=QTY")]
    quantity: Vec<String>,

    /// Output format: text summary, or the updated result as JSON
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: InvoiceArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let result = read_returned(&args.input).await?.decode();
    let kind = result.kind();
    let CaptureResult::Success {
        specific_extractions,
        compound_extractions,
        return_reasons,
    } = result
    else {
        anyhow::bail!("Result is {}, there is no invoice to review", kind);
    };

    let mut invoice =
        DigitalInvoice::with_config(specific_extractions, compound_extractions, &config.invoice)?;

    for entry in &args.quantity {
        let (line, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected LINE=QTY, got {}", entry))?;
        let quantity: i64 = value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid quantity: {}", value))?;
        invoice.set_quantity(parse_line(line)?, quantity)?;
    }

    for entry in &args.deselect {
        let (line, reason_id) = match entry.split_once('=') {
            Some((line, reason)) => (line, Some(reason.trim())),
            None => (entry.as_str(), None),
        };
        let reason = reason_id
            .map(|id| lookup_reason(&return_reasons, id))
            .transpose()?;
        invoice.deselect(parse_line(line)?, reason)?;
    }

    info!(
        "{} of {} line items selected",
        invoice.selected_count(),
        invoice.line_items().len()
    );

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);

    let output = match format {
        OutputFormat::Text => format_text(&invoice, &config.invoice.language)?,
        OutputFormat::Json => {
            let returned = encode(&invoice.into_result(return_reasons)?);
            to_json(&returned, config.output.pretty)?
        }
    };

    emit(&output, args.output.as_deref()).await
}

/// Line numbers are 1-based on the command line.
fn parse_line(line: &str) -> anyhow::Result<usize> {
    match line.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => anyhow::bail!("Invalid line number: {}", line),
    }
}

fn lookup_reason(reasons: &[ReturnReason], id: &str) -> anyhow::Result<ReturnReason> {
    find_reason(reasons, id).cloned().ok_or_else(|| {
        let known: Vec<&str> = reasons.iter().map(|r| r.id.as_str()).collect();
        anyhow::anyhow!(
            "Unknown return reason: {} (available: {})",
            id,
            if known.is_empty() { "none".to_string() } else { known.join(", ") }
        )
    })
}

fn format_text(invoice: &DigitalInvoice, language: &str) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!(
        "Line items ({} of {} selected):\n",
        invoice.selected_count(),
        invoice.line_items().len()
    ));

    for (i, item) in invoice.line_items().iter().enumerate() {
        let line = &item.line_item;
        output.push_str(&format!(
            "  [{}] {}. {}  {} x {} = {}",
            if item.selected { "x" } else { " " },
            i + 1,
            line.description,
            line.quantity,
            line.gross_price,
            line.total_gross_price()?
        ));
        if let Some(reason) = &item.reason {
            output.push_str(&format!("  (returned: {})", reason.label(language)));
        }
        output.push('\n');
    }

    output.push_str(&format!("\nTotal: {}", invoice.total_price()?));

    Ok(output)
}
