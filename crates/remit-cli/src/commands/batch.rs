//! Batch processing command for multiple remittance files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use remit_core::{write_rows, Pipeline};

use super::{load_config, OutputFormat};

/// Extensions picked up from the glob.
const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods", "csv", "pdf"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    partner: String,
    rows: Option<usize>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let pipeline = Pipeline::new(load_config(config_path)?);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p) && !is_own_output(&pipeline, p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let format = args.format.into();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let partner = pipeline
            .registry()
            .select(&path.to_string_lossy())
            .partner
            .unwrap_or("generic")
            .to_string();

        let outcome = pipeline.process(&path, None).and_then(|outcome| {
            let default_path = pipeline.default_output_path(&path, format);
            let output_path = match &args.output_dir {
                Some(dir) => dir.join(default_path.file_name().unwrap_or_default()),
                None => default_path,
            };
            write_rows(&output_path, format, outcome.columns, &outcome.rows)?;
            debug!("Wrote output to {}", output_path.display());
            Ok(outcome.rows.len())
        });

        let processing_time_ms = file_start.elapsed().as_millis() as u64;
        match outcome {
            Ok(rows) => results.push(BatchResult {
                path,
                partner,
                rows: Some(rows),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                warn!("Error processing file {} ({}): {}", path.display(), partner, e);
                results.push(BatchResult {
                    path,
                    partner,
                    rows: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {} ({}): {}",
                result.path.display(),
                result.partner,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Skip files this tool wrote on an earlier run.
fn is_own_output(pipeline: &Pipeline, path: &Path) -> bool {
    let prefix = &pipeline.config().output.file_prefix;
    !prefix.is_empty()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix.as_str()))
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "partner", "status", "rows", "processing_time_ms", "error"])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let status = if result.error.is_some() { "error" } else { "success" };
        let rows = result.rows.map(|n| n.to_string()).unwrap_or_default();

        wtr.write_record([
            filename,
            &result.partner,
            status,
            &rows,
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
