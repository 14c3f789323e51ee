//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod partners;
pub mod process;

use std::path::Path;

use anyhow::Context;
use remit_core::models::config::RemitConfig;
use tracing::debug;

/// Output format flag shared by `process` and `batch`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single-sheet xlsx workbook
    Xlsx,
    /// CSV with the layout's header row
    Csv,
    /// JSON array of records
    Json,
}

impl From<OutputFormat> for remit_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => remit_core::OutputFormat::Xlsx,
            OutputFormat::Csv => remit_core::OutputFormat::Csv,
            OutputFormat::Json => remit_core::OutputFormat::Json,
        }
    }
}

/// Load configuration from `-c`, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RemitConfig> {
    if let Some(path) = config_path {
        return RemitConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        return RemitConfig::from_file(&default_path)
            .with_context(|| format!("Failed to load config from {}", default_path.display()));
    }

    Ok(RemitConfig::default())
}
