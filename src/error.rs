//! Custom error types for rustlitreview.
//!
//! This module defines all error types used throughout the pipeline.
//! All functions return `Result<T, ReviewError>` instead of using `unwrap()`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rustlitreview operations.
///
/// Every variant is an input-validation failure: nothing is retried and a
/// failing source aborts the run before deduplication.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// File is neither CSV nor a readable spreadsheet workbook
    #[error("Unsupported format: {}: {reason}", path.display())]
    UnsupportedFormat {
        /// Offending file
        path: PathBuf,
        /// What the spreadsheet reader reported
        reason: String,
    },

    /// A column named in the source profile is missing from the loaded table
    #[error("Schema mismatch in source '{source_name}': missing column '{column}'")]
    SchemaMismatch {
        /// Source profile name
        source_name: String,
        /// Raw column that could not be found
        column: String,
    },

    /// The year or publication date cell could not be turned into a year
    #[error("Date parse failure in source '{source_name}', row {row}: cannot read a year from '{value}'")]
    DateParseFailure {
        /// Source profile name
        source_name: String,
        /// 1-based data row (header excluded)
        row: usize,
        /// Raw cell content
        value: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline config could not be parsed
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Pipeline config could not be rendered
    #[error("Config render error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `ReviewError`
pub type Result<T> = std::result::Result<T, ReviewError>;

impl ReviewError {
    /// Build a `SchemaMismatch` for the given source and column
    pub fn schema_mismatch(source_name: &str, column: &str) -> Self {
        Self::SchemaMismatch {
            source_name: source_name.to_string(),
            column: column.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_names_source_and_column() {
        let err = ReviewError::schema_mismatch("Scopus", "Cited by");
        let msg = err.to_string();
        assert!(msg.contains("Scopus"));
        assert!(msg.contains("'Cited by'"));
    }

    #[test]
    fn test_unsupported_format_shows_path() {
        let err = ReviewError::UnsupportedFormat {
            path: PathBuf::from("exports/wos.txt"),
            reason: "invalid zip header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported format: exports/wos.txt: invalid zip header"
        );
    }
}
