//! CLI application for capture result decoding.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, decode, invoice};

/// Capture results - decode returned payloads and review digital invoices
#[derive(Parser)]
#[command(name = "capkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a returned result into its outcome
    Decode(decode::DecodeArgs),

    /// Review the line items of a digital invoice result
    Invoice(invoice::InvoiceArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Stdout carries command output, so logs go to stderr.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let max_level = [Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
        [usize::from(verbose.min(3))];

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(max_level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish(),
    )?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Decode(args) => decode::run(args, config_path).await,
        Commands::Invoice(args) => invoice::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
