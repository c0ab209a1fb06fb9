// Spreadsheet import (xlsx, xls, xlsb, ods) for registry exports and extracts.
//
// Only the first row is treated as headers; every cell is flattened to text.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::SourceError;
use crate::table::Table;

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Integers without decimals (row ids, numeric org codes)
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => format!("{n}"),
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Read one sheet into a [`Table`]. Uses the first sheet when `sheet` is `None`.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table, SourceError> {
    // Read through std first so missing and unreadable files classify like CSVs.
    let bytes = std::fs::read(path).map_err(|e| SourceError::from_io(&e, path))?;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SourceError::other(format!("{}: failed to open spreadsheet: {e}", path.display())))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SourceError::other(format!("{}: spreadsheet contains no sheets", path.display())))?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        SourceError::other(format!("{}: failed to read sheet '{sheet_name}': {e}", path.display()))
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => {
            return Err(SourceError::other(format!(
                "{}: sheet '{sheet_name}' has no header row",
                path.display()
            )))
        }
    };

    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|v| !v.trim().is_empty()))
        .collect();

    log::debug!("{}: sheet '{sheet_name}', {} data rows", path.display(), rows.len());

    Ok(Table { headers, rows })
}
