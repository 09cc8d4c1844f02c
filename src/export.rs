//! Spreadsheet export of formatted references.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cite::CitationStyle;

/// One exported row: a single `Reference` column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "Reference")]
    pub reference: String,
}

impl ReferenceRow {
    /// Wrap a citation string as an export row
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Errors from writing the workbook
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Derive the export filename from the chosen style
pub fn default_filename(style: CitationStyle) -> String {
    format!("Scholar_References_{}.xlsx", style)
}

/// Write the reference rows to an xlsx workbook at `path`.
///
/// One sheet, a bold `Reference` header, one row per citation.
pub fn write_workbook(path: &Path, rows: &[ReferenceRow]) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("References")?;

    let header = Format::new().set_bold();
    worksheet.write_string_with_format(0, 0, "Reference", &header)?;

    for (i, row) in rows.iter().enumerate() {
        worksheet.write_string(i as u32 + 1, 0, row.reference.as_str())?;
    }

    // Citations are long single-line strings; widen the column
    worksheet.set_column_width(0, 100)?;

    workbook.save(path)?;
    Ok(())
}
