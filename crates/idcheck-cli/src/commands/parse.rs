//! Parse command - extract identity fields from one saved OCR response.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use idcheck_core::identity::rules::DateOrder;
use idcheck_core::identity::IdentityParser;

use super::{load_config, read_ocr_file};
use crate::output::{format_outcome, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// OCR response JSON (full response or bare fragment array)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Order dates by calendar instead of by text
    #[arg(long)]
    chronological: bool,

    /// Print how each fragment was classified
    #[arg(long)]
    trace: bool,

    /// Exit with an error when the record is incomplete
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing OCR output: {}", args.input.display());

    let response = read_ocr_file(&args.input)?;
    if !response.success {
        eprintln!(
            "{} OCR response is marked as unsuccessful, parsing anyway.",
            style("!").yellow()
        );
    }

    let mut parser = IdentityParser::from_config(&config.extraction);
    if args.chronological {
        parser = parser.with_date_order(DateOrder::Chronological);
    }

    let (outcome, trace) = parser.extract_with_trace(&response.extracted_text);

    if args.trace {
        for classification in &trace {
            let label = if classification.skipped {
                style("header").dim().to_string()
            } else if classification.is_claimed() {
                style("claimed").green().to_string()
            } else {
                style("unused").yellow().to_string()
            };
            eprintln!("  [{:>3}] {:<8} {}", classification.order, label, classification.text);
        }
    }

    let output = format_outcome(&outcome, args.format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && !outcome.success {
        anyhow::bail!("Could not extract all required information from ID.");
    }

    Ok(())
}
