//! Line pattern parser for text extracted from remittance PDFs.

use tracing::{debug, trace};

use super::patterns::PDF_REMITTANCE_LINE;

/// One `(CUIN, date, remark, amount)` tuple recovered from PDF text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLine {
    pub cuin: String,
    /// Date as printed, `dd-mm-yy`.
    pub date: String,
    pub remark: String,
    /// Amount with separators removed and a trailing minus moved to the front.
    pub amount: String,
}

/// Parse every remittance line in `text`. Matches are independent; no state
/// carries from one line to the next.
pub fn parse_pdf_lines(text: &str) -> Vec<PdfLine> {
    let lines: Vec<PdfLine> = PDF_REMITTANCE_LINE
        .captures_iter(text)
        .map(|caps| {
            let line = PdfLine {
                cuin: caps[1].to_string(),
                date: caps[2].to_string(),
                remark: caps[3].trim().to_string(),
                amount: move_trailing_minus(&caps[4].replace(',', "")),
            };
            trace!("PDF line: {:?}", line);
            line
        })
        .collect();

    debug!("Matched {} remittance lines in PDF text", lines.len());
    lines
}

fn move_trailing_minus(amount: &str) -> String {
    match amount.strip_suffix('-') {
        Some(value) => format!("-{}", value),
        None => amount.to_string(),
    }
}
