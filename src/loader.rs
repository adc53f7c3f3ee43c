//! Raw table loading.
//!
//! A `.csv` path is always parsed as delimited text; anything else is handed
//! to calamine as a spreadsheet workbook (first sheet, first row as header).
//! Every cell is rendered to text so the adapters see one shape regardless of
//! the file format.

use crate::error::{ReviewError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};

/// A loaded export: header names plus text rows, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from header and row literals.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Position of the header with this exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell text, or "" for a short row
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Input formats the loader distinguishes between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Decide by suffix only. File content is never inspected.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Spreadsheet,
        }
    }
}

/// Load one export file into a `RawTable`.
///
/// # Errors
///
/// * `ReviewError::Csv` when a `.csv` file cannot be read or parsed
/// * `ReviewError::UnsupportedFormat` when a non-CSV file is not a readable workbook
pub fn load(path: &Path) -> Result<RawTable> {
    let format = SourceFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Loading source file");

    let table = match format {
        SourceFormat::Csv => load_csv(path)?,
        SourceFormat::Spreadsheet => load_spreadsheet(path)?,
    };

    info!(
        path = %path.display(),
        ?format,
        columns = table.headers.len(),
        rows = table.len(),
        "Loaded source"
    );
    Ok(table)
}

fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(clean_header).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

fn load_spreadsheet(path: &Path) -> Result<RawTable> {
    let unsupported = |reason: String| ReviewError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unsupported(e.to_string()))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| unsupported("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| unsupported(format!("cannot read sheet '{}': {}", first_sheet, e)))?;

    let mut rows_iter = range.rows();
    let headers = rows_iter
        .next()
        .map(|row| row.iter().map(|c| clean_header(&cell_text(c))).collect())
        .unwrap_or_default();
    let rows = rows_iter
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    debug!(sheet = %first_sheet, "Read first worksheet");
    Ok(RawTable { headers, rows })
}

/// Exports often carry a UTF-8 BOM on the first header.
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Render a spreadsheet cell the way it would appear in a CSV export
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
