//! Spreadsheet export.
//!
//! Reports are exported as CSV, which every spreadsheet application opens.
//! Column headers come from the serialized field names of the row type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Which report a spreadsheet export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportSheet {
    #[default]
    Hacienda,
    Gastos,
    Lluvias,
    Liquidaciones,
}

impl ExportSheet {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportSheet::Hacienda => "hacienda",
            ExportSheet::Gastos => "gastos",
            ExportSheet::Lluvias => "lluvias",
            ExportSheet::Liquidaciones => "liquidaciones",
        }
    }

    /// Attachment filename for this sheet.
    pub fn filename(self) -> String {
        format!("agronexo_{}.csv", self.as_str())
    }
}

impl fmt::Display for ExportSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportSheet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "hacienda" => Ok(ExportSheet::Hacienda),
            "gastos" => Ok(ExportSheet::Gastos),
            "lluvias" => Ok(ExportSheet::Lluvias),
            "liquidaciones" => Ok(ExportSheet::Liquidaciones),
            other => Err(CoreError::Validation(format!(
                "Unknown sheet '{other}'. Must be one of: hacienda, gastos, lluvias, liquidaciones"
            ))),
        }
    }
}

/// Serialize `rows` into a CSV document with a header row.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CoreError::Internal(format!("CSV serialization failed: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("CSV is not UTF-8: {e}")))
}
