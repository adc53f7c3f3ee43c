//! Unified record model shared by every stage after the adapters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One bibliographic entry in the common schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Database")]
    pub database: String,
    #[serde(rename = "Citations")]
    pub citations: Option<u64>,
}

impl UnifiedRecord {
    /// Text of a single field, as shown in reports and exports
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Authors => self.authors.clone(),
            Column::Title => self.title.clone(),
            Column::Year => self.year.to_string(),
            Column::Database => self.database.clone(),
            Column::Citations => self
                .citations
                .map(|c| c.to_string())
                .unwrap_or_default(),
        }
    }

    /// Duplicate-cluster key
    pub fn key(&self) -> (&str, &str, i32) {
        (&self.authors, &self.title, self.year)
    }
}

/// Unified field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Authors,
    Title,
    Year,
    Database,
    Citations,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Authors => "Authors",
            Column::Title => "Title",
            Column::Year => "Year",
            Column::Database => "Database",
            Column::Citations => "Citations",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Column order produced by the adapters and the merger
pub const UNIFIED_COLUMNS: [Column; 5] = [
    Column::Authors,
    Column::Title,
    Column::Year,
    Column::Database,
    Column::Citations,
];

/// Records plus the order their columns are presented in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedTable {
    pub columns: Vec<Column>,
    pub records: Vec<UnifiedRecord>,
}

impl UnifiedTable {
    pub fn new(records: Vec<UnifiedRecord>) -> Self {
        Self {
            columns: UNIFIED_COLUMNS.to_vec(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header names in presentation order
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }

    /// Cells of one record in presentation order
    pub fn row(&self, record: &UnifiedRecord) -> Vec<String> {
        self.columns.iter().map(|c| record.cell(*c)).collect()
    }

    /// Move `column` to the front, keeping the others in relative order
    pub fn move_to_front(&mut self, column: Column) {
        if let Some(pos) = self.columns.iter().position(|c| *c == column) {
            let col = self.columns.remove(pos);
            self.columns.insert(0, col);
        }
    }
}
