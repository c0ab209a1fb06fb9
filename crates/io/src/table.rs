// Header + string rows, the common shape of CSV and spreadsheet inputs.

use std::path::Path;

use crate::error::SourceError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Trimmed header names.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Column index, or an error naming the file and the missing header.
    pub fn require_column(&self, name: &str, source: &str) -> Result<usize, SourceError> {
        self.column(name).ok_or_else(|| {
            SourceError::other(format!("{source}: missing column '{name}'"))
        })
    }
}

/// Cell `idx` of `row`, trimmed. Short rows read as empty.
pub fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

/// Load a CSV or spreadsheet file. `sheet` only applies to spreadsheets; the
/// first sheet is used when it is `None`.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table, SourceError> {
    match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => {
            let content = crate::csv::read_file_as_utf8(path)?;
            crate::csv::parse_table(&content)
                .map_err(|e| SourceError::other(format!("{}: {e}", path.display())))
        }
        Some(TableFormat::Spreadsheet) => crate::xlsx::read_table(path, sheet),
        None => Err(SourceError::other(format!(
            "{}: unsupported file type (expected .csv, .xlsx, .xls, .xlsb or .ods)",
            path.display()
        ))),
    }
}
