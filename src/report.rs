//! Before/after counts and table rendering.

use crate::dedup::Deduplication;
use crate::record::UnifiedTable;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use std::fmt;

/// Rows per database label in the deduplicated output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub database: String,
    pub count: usize,
}

/// Counts printed at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub before: usize,
    pub removed: usize,
    pub after: usize,
    pub per_source: Vec<SourceCount>,
    /// Rows whose `Database` matches none of the known labels
    pub unlabelled: usize,
}

/// Build the summary for a deduplicated table.
///
/// `labels` are the known database labels, in the order they should be listed.
pub fn summarize(dedup: &Deduplication, labels: &[String]) -> Summary {
    let per_source: Vec<SourceCount> = labels
        .iter()
        .map(|label| SourceCount {
            database: label.clone(),
            count: dedup
                .table
                .records
                .iter()
                .filter(|r| &r.database == label)
                .count(),
        })
        .collect();

    let labelled: usize = per_source.iter().map(|s| s.count).sum();

    Summary {
        before: dedup.input,
        removed: dedup.removed(),
        after: dedup.kept,
        unlabelled: dedup.kept.saturating_sub(labelled),
        per_source,
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Studies before deduplication: {}", self.before)?;
        writeln!(f, "Duplicate studies removed:    {}", self.removed)?;
        writeln!(f, "Studies after deduplication:  {}", self.after)?;
        writeln!(f)?;
        writeln!(f, "Studies per database:")?;
        for source in &self.per_source {
            writeln!(f, "  {}: {}", source.database, source.count)?;
        }
        if self.unlabelled > 0 {
            writeln!(f, "  (unrecognised label): {}", self.unlabelled)?;
        }
        Ok(())
    }
}

/// Render every row and column, nothing truncated
pub fn render_table(table: &UnifiedTable) -> String {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(table.headers());

    for record in &table.records {
        out.add_row(table.row(record));
    }

    out.to_string()
}
