//! Optional file export of the deduplicated table.

use crate::dedup::Deduplication;
use crate::error::Result;
use crate::record::{UnifiedRecord, UnifiedTable};
use crate::report::Summary;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Write the table as CSV, columns in presentation order
pub fn save_csv(path: &Path, table: &UnifiedTable) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;

    wtr.write_record(table.headers())?;
    for record in &table.records {
        wtr.write_record(table.row(record))?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = table.len(), "Saved deduplicated table");
    Ok(())
}

/// JSON document printed by `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub summary: &'a Summary,
    pub records: &'a [UnifiedRecord],
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &'a Summary, dedup: &'a Deduplication) -> Self {
        Self {
            summary,
            records: &dedup.table.records,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
