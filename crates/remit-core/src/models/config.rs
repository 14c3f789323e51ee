//! Configuration structures for remittance normalization.

use serde::{Deserialize, Serialize};

use super::row::Field;

/// Main configuration for the remit pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemitConfig {
    /// Header synonyms per canonical field.
    pub headers: HeaderConfig,

    /// Marker phrases that drive region location and row reclassification.
    pub markers: MarkerConfig,

    /// Column offsets for the fixed-position layout.
    pub fixed_position: FixedPositionConfig,

    /// Partner routing table, tested in order against the input path.
    pub partners: Vec<PartnerRoute>,

    /// Output naming.
    pub output: OutputConfig,
}

impl Default for RemitConfig {
    fn default() -> Self {
        Self {
            headers: HeaderConfig::default(),
            markers: MarkerConfig::default(),
            fixed_position: FixedPositionConfig::default(),
            partners: default_partners(),
            output: OutputConfig::default(),
        }
    }
}

/// Acceptable header labels per canonical field, in priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub invoice_number: Vec<String>,
    pub amount: Vec<String>,
    pub cuin: Vec<String>,
    pub remark: Vec<String>,
    pub date: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            invoice_number: strings(&[
                "Invoice",
                "Number",
                "Referance No",
                "Doc/Inv # ",
                "INV. NO:-",
                "INVOICE NO",
            ]),
            amount: strings(&[
                "Invoice amount",
                "Original",
                "Amount Paid (Ksh)",
                "Net Pay",
                "TO SUPPLIER",
                "AMOUNT",
                "CFP AMT",
            ]),
            cuin: strings(&["CUIN Number", "Suplr Inv # ", "INVOICE #"]),
            remark: strings(&["Remark", "Remarks", "REMARKS", "REMARK"]),
            date: strings(&["Date", "DATE"]),
        }
    }
}

impl HeaderConfig {
    /// Synonyms for one canonical field.
    pub fn synonyms(&self, field: Field) -> &[String] {
        match field {
            Field::InvoiceNumber => &self.invoice_number,
            Field::Amount => &self.amount,
            Field::Cuin => &self.cuin,
            Field::Remark => &self.remark,
            Field::Date => &self.date,
        }
    }
}

/// Marker phrases. All comparisons are case-insensitive substring matches
/// unless noted otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Terms identifying the header row of a loosely structured sheet.
    pub region_start: Vec<String>,

    /// Phrases in the CUIN column that mark a credit-note line (fixed-position layout).
    pub credit_note: Vec<String>,

    /// Invoice-column phrases that open a credit range.
    pub credit_range_begin: Vec<String>,

    /// Invoice-column phrase that closes a credit range.
    pub credit_range_end: String,

    /// Remark value (exact match) that marks a continuation row.
    pub continuation_remark: String,

    /// Invoice/CUIN fragments that identify repeated header or summary rows
    /// in the generic layout. Trailing spaces are significant.
    pub generic_invoice_noise: Vec<String>,

    /// CUIN fragments that identify repeated header rows in the generic layout.
    pub generic_cuin_noise: Vec<String>,

    /// Invoice-column markers that end the data region in the generic layout,
    /// tried in order.
    pub generic_stop: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            region_start: strings(&["Date", "Amount"]),
            credit_note: strings(&["CREDIT NOTE B", "IMPART TO CREDITOR"]),
            credit_range_begin: strings(&["less credits", "less returns"]),
            credit_range_end: "to pay".to_string(),
            continuation_remark: "ss".to_string(),
            generic_invoice_noise: strings(&["INVOICE #", "less credits ", "to pay "]),
            generic_cuin_noise: strings(&["INVOICE #"]),
            generic_stop: strings(&["Payment Date", "Total"]),
        }
    }
}

/// Zero-based column positions for the fixed-position layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPositionConfig {
    pub date_column: usize,
    pub invoice_column: usize,
    pub cuin_column: usize,
    pub amount_column: usize,
}

impl Default for FixedPositionConfig {
    fn default() -> Self {
        Self {
            date_column: 0,
            invoice_column: 3,
            cuin_column: 4,
            amount_column: 7,
        }
    }
}

/// Extraction layout a partner is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Columns addressed by position, credit notes sign-flipped.
    FixedPosition,
    /// Header-resolved with "less credits ... to pay" ranges.
    CreditRange,
    /// Line pattern over PDF text.
    PdfText,
    /// Header-resolved fallback.
    Generic,
}

/// Maps a partner name found in the input path to a layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRoute {
    /// Literal, case-sensitive substring searched in the input path.
    pub name: String,
    /// Layout used for matching files.
    pub layout: Layout,
}

impl PartnerRoute {
    pub fn new(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
        }
    }
}

fn default_partners() -> Vec<PartnerRoute> {
    vec![
        PartnerRoute::new("Quick Mart Limited", Layout::FixedPosition),
        PartnerRoute::new("Chandarana Supermarket", Layout::CreditRange),
        PartnerRoute::new("Majid Al Futaim Hypermarkets Ltd", Layout::PdfText),
    ]
}

/// Output naming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix added to the input file stem when no output path is given.
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "Cleaned ".to_string(),
        }
    }
}

impl RemitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "fixed_position": { "amount_column": 9 } }"#;
        let config: RemitConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.fixed_position.amount_column, 9);
        assert_eq!(config.fixed_position.invoice_column, 3);
        assert_eq!(config.partners.len(), 3);
        assert_eq!(config.markers.credit_range_end, "to pay");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RemitConfig::default();
        config
            .partners
            .push(PartnerRoute::new("Naivas", Layout::Generic));
        config.save(&path).unwrap();

        let loaded = RemitConfig::from_file(&path).unwrap();
        assert_eq!(loaded.partners.len(), 4);
        assert_eq!(loaded.partners[3].layout, Layout::Generic);
        assert_eq!(loaded.headers.cuin[1], "Suplr Inv # ");
    }
}
