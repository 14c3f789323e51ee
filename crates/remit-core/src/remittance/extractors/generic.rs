//! Generic layout, used for any partner without a dedicated route.

use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::models::config::{HeaderConfig, MarkerConfig, RemitConfig};
use crate::models::row::{CanonicalRow, Field};
use crate::remittance::rules::{
    amount_from_cell, contains_any_ignore_case, contains_ignore_case, format_amount, locate_region,
    HeaderMap,
};
use crate::remittance::{expect_table, Document, RemittanceExtractor, Result};

const COLUMNS: &[Field] = &[Field::InvoiceNumber, Field::Cuin, Field::Amount, Field::Date];

/// Header-resolved fallback extractor.
pub struct GenericExtractor {
    headers: HeaderConfig,
    markers: MarkerConfig,
}

impl GenericExtractor {
    pub fn new(headers: HeaderConfig, markers: MarkerConfig) -> Self {
        Self { headers, markers }
    }

    pub fn from_config(config: &RemitConfig) -> Self {
        Self::new(config.headers.clone(), config.markers.clone())
    }

    fn is_noise(&self, invoice: &str, cuin: &str) -> bool {
        contains_any_ignore_case(invoice, &self.markers.generic_invoice_noise)
            || contains_any_ignore_case(cuin, &self.markers.generic_cuin_noise)
    }

    /// Position of the first row matching the earliest stop marker that
    /// occurs at all.
    fn stop_at(&self, rows: &[CanonicalRow]) -> Option<usize> {
        self.markers.generic_stop.iter().find_map(|marker| {
            rows.iter().position(|row| {
                contains_ignore_case(row.invoice_number.as_deref().unwrap_or_default(), marker)
            })
        })
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::from_config(&RemitConfig::default())
    }
}

impl RemittanceExtractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn columns(&self) -> &'static [Field] {
        COLUMNS
    }

    fn extract(&self, document: &Document) -> Result<Vec<CanonicalRow>> {
        let table = expect_table(self.name(), document)?;
        let start = locate_region(table, &self.markers.region_start);
        let view = table.with_header_at(start);

        let map = HeaderMap::resolve(&view.headers, &self.headers, COLUMNS);
        let amount_col = map
            .column(Field::Amount)
            .ok_or(ExtractionError::MissingColumn(Field::Amount))?;
        let invoice_col = map.column(Field::InvoiceNumber);
        let cuin_col = map.column(Field::Cuin);
        let date_col = map.column(Field::Date);

        let mut candidates = Vec::with_capacity(view.body.len());
        let mut amounts = Vec::with_capacity(view.body.len());
        for i in 0..view.body.len() {
            let row = CanonicalRow {
                date: view.cell(i, date_col).as_text(),
                invoice_number: view.cell(i, invoice_col).as_text(),
                cuin: view.cell(i, cuin_col).as_text(),
                amount: None,
                remark: None,
            };

            let invoice = row.invoice_number.as_deref().unwrap_or_default();
            let cuin = row.cuin.as_deref().unwrap_or_default();
            if self.is_noise(invoice, cuin) {
                trace!("Row {}: repeated header or summary, dropped", i);
                continue;
            }

            candidates.push(row);
            amounts.push(view.cell(i, Some(amount_col)));
        }

        if let Some(stop) = self.stop_at(&candidates) {
            debug!("Data region ends at candidate row {}", stop);
            candidates.truncate(stop);
        }

        let mut rows = Vec::with_capacity(candidates.len());
        for (mut row, cell) in candidates.into_iter().zip(amounts) {
            if !row.has_reference() {
                continue;
            }
            row.amount = amount_from_cell(cell)?.map(format_amount);
            rows.push(row);
        }

        debug!("Generic walk kept {} of {} rows", rows.len(), view.body.len());
        Ok(rows)
    }
}
