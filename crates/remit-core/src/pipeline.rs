//! File-level processing: load, route, extract.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{RemitError, Result};
use crate::models::config::RemitConfig;
use crate::models::row::{CanonicalRow, Field};
use crate::output::OutputFormat;
use crate::pdf::read_pdf_text;
use crate::remittance::{Document, ExtractorRegistry, Selection};
use crate::sheet::read_sheet;

/// Result of processing one remittance file.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Partner route that matched, `None` for the generic layout.
    pub partner: Option<String>,
    /// Extractor that produced the rows.
    pub extractor: &'static str,
    /// Output columns, in order.
    pub columns: &'static [Field],
    /// Canonical rows.
    pub rows: Vec<CanonicalRow>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Loads remittance files and runs the configured extractors over them.
pub struct Pipeline {
    config: RemitConfig,
    registry: ExtractorRegistry,
}

impl Pipeline {
    pub fn new(config: RemitConfig) -> Self {
        let registry = ExtractorRegistry::from_config(&config);
        Self { config, registry }
    }

    pub fn config(&self) -> &RemitConfig {
        &self.config
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Process one file. `partner` forces a route by exact name instead of
    /// matching against the path.
    pub fn process(&self, path: &Path, partner: Option<&str>) -> Result<ProcessOutcome> {
        let start = Instant::now();

        let selection = self.select(path, partner)?;
        let document = load_document(path)?;
        let rows = selection.extractor.extract(&document)?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "{}: {} rows via {} in {}ms",
            path.display(),
            rows.len(),
            selection.extractor.name(),
            processing_time_ms
        );

        Ok(ProcessOutcome {
            partner: selection.partner.map(str::to_string),
            extractor: selection.extractor.name(),
            columns: selection.extractor.columns(),
            rows,
            processing_time_ms,
        })
    }

    fn select(&self, path: &Path, partner: Option<&str>) -> Result<Selection<'_>> {
        match partner {
            Some(name) => self
                .registry
                .by_partner(name)
                .ok_or_else(|| RemitError::Config(format!("unknown partner: {}", name))),
            None => Ok(self.registry.select(&path.to_string_lossy())),
        }
    }

    /// Default output path: `<prefix><input stem>.<ext>` next to the input.
    pub fn default_output_path(&self, input: &Path, format: OutputFormat) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!(
            "{}{}.{}",
            self.config.output.file_prefix,
            stem,
            format.extension()
        );
        input.with_file_name(name)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(RemitConfig::default())
    }
}

/// Load a file as a [`Document`]: PDFs as text, everything else as a sheet.
pub fn load_document(path: &Path) -> Result<Document> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        debug!("Loading {} as PDF", path.display());
        Ok(Document::Text(read_pdf_text(path)?))
    } else {
        debug!("Loading {} as spreadsheet", path.display());
        Ok(Document::Table(read_sheet(path)?))
    }
}
