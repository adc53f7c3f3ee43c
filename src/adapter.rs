//! Source adapter: raw export table -> unified records.
//!
//! One transform serves every database; the `SourceProfile` says which raw
//! columns to read and which cleanup steps apply.

use crate::error::{ReviewError, Result};
use crate::loader::RawTable;
use crate::profile::{SourceProfile, YearFormat};
use crate::record::{UnifiedRecord, UnifiedTable};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// Innermost parenthesized group; applied repeatedly to handle nesting
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)").expect("valid parenthetical regex"));

/// Day and month in either order, four-digit year last
static YEAR_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}[-/.]\d{1,2}[-/.](\d{4})$").expect("valid year suffix regex")
});

/// `YYYY` or `YYYY-MM`
static YEAR_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:[-/]\d{1,2})?$").expect("valid year regex"));

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Resolved positions of the profile's columns in a raw table
struct ColumnMap {
    authors: usize,
    title: usize,
    year: usize,
    citations: usize,
    label: Option<usize>,
}

impl ColumnMap {
    fn resolve(raw: &RawTable, profile: &SourceProfile) -> Result<Self> {
        let find = |column: &str| {
            raw.column_index(column)
                .ok_or_else(|| ReviewError::schema_mismatch(&profile.name, column))
        };

        Ok(Self {
            authors: find(profile.authors.as_str())?,
            title: find(profile.title.as_str())?,
            year: find(profile.year.as_str())?,
            citations: find(profile.citations.as_str())?,
            label: profile.label_column.as_deref().map(find).transpose()?,
        })
    }
}

/// Map a raw export onto the unified schema and normalize its text fields.
///
/// # Errors
///
/// * `ReviewError::SchemaMismatch` if any profile column is absent
/// * `ReviewError::DateParseFailure` if a row's year/date cell has no readable year
pub fn adapt(raw: &RawTable, profile: &SourceProfile) -> Result<UnifiedTable> {
    let map = ColumnMap::resolve(raw, profile)?;

    let mut records = Vec::with_capacity(raw.len());
    for row in 0..raw.len() {
        let year_cell = raw.cell(row, map.year);
        let year = parse_year(year_cell, profile.year_format).ok_or_else(|| {
            ReviewError::DateParseFailure {
                source_name: profile.name.clone(),
                row: row + 1,
                value: year_cell.to_string(),
            }
        })?;

        let database = match map.label {
            Some(col) => raw.cell(row, col).trim().to_string(),
            None => profile.name.clone(),
        };

        let citations_cell = raw.cell(row, map.citations);
        let citations = parse_citations(citations_cell);
        if citations.is_none() && !citations_cell.trim().is_empty() {
            warn!(
                source = %profile.name,
                row = row + 1,
                value = citations_cell,
                "Unreadable citation count, treating as missing"
            );
        }

        records.push(UnifiedRecord {
            authors: normalize_authors(raw.cell(row, map.authors), profile.strip_parentheticals),
            title: normalize_title(raw.cell(row, map.title)),
            year,
            database,
            citations,
        });
    }

    info!(source = %profile.name, rows = records.len(), "Adapted source");
    Ok(UnifiedTable::new(records))
}

/// Remove every parenthesized substring, then trim
pub fn strip_parentheticals(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = PARENTHETICAL.replace_all(&current, "").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}

/// Author list: optional parenthetical stripping, then no whitespace, lowercase
pub fn normalize_authors(raw: &str, strip: bool) -> String {
    let text = if strip {
        strip_parentheticals(raw)
    } else {
        raw.to_string()
    };
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Titles are only lowercased; punctuation and spacing are kept as exported
pub fn normalize_title(raw: &str) -> String {
    raw.to_lowercase()
}

/// Extract a publication year from a year or date cell
pub fn parse_year(raw: &str, format: YearFormat) -> Option<i32> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    match format {
        YearFormat::Year => parse_whole_number(value).and_then(|n| i32::try_from(n).ok()),
        YearFormat::Date => parse_date_year(value),
    }
}

fn parse_date_year(value: &str) -> Option<i32> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date.year());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.year());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.year());
    }

    let year = YEAR_PREFIX
        .captures(value)
        .or_else(|| YEAR_SUFFIX.captures(value))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());
    if year.is_some() {
        debug!(value, "Partial date, using year only");
    }
    year
}

/// Citation count; empty or non-numeric cells are missing
pub fn parse_citations(raw: &str) -> Option<u64> {
    parse_whole_number(raw.trim()).and_then(|n| u64::try_from(n).ok())
}

/// Integer text, or float text with no fractional part (`"12.0"`)
fn parse_whole_number(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        // `as` saturates; reject anything outside i64 instead
        .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}
