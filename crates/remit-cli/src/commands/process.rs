//! Process command - normalize a single remittance file.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use remit_core::{write_rows, Pipeline};

use super::{load_config, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (spreadsheet, CSV or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: "Cleaned <input>" next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Use this partner's layout instead of matching the file path
    #[arg(short, long)]
    partner: Option<String>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pipeline = Pipeline::new(config);
    let partner_label = args
        .partner
        .clone()
        .or_else(|| {
            pipeline
                .registry()
                .select(&args.input.to_string_lossy())
                .partner
                .map(str::to_string)
        })
        .unwrap_or_else(|| "generic".to_string());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting ({})...", partner_label));

    let result = pipeline.process(&args.input, args.partner.as_deref());
    pb.finish_and_clear();

    let outcome = result.with_context(|| {
        format!(
            "Error processing file {} for partner {}",
            args.input.display(),
            partner_label
        )
    })?;

    let format = args.format.into();
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| pipeline.default_output_path(&args.input, format));

    write_rows(&output_path, format, outcome.columns, &outcome.rows)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "{} {} rows ({}) written to {}",
        style("✓").green(),
        outcome.rows.len(),
        outcome.extractor,
        output_path.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
