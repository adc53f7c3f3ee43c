//! Row-wise concatenation of adapted sources.

use crate::record::UnifiedTable;
use tracing::debug;

/// Concatenate tables in argument order, keeping each table's row order.
pub fn merge(tables: Vec<UnifiedTable>) -> UnifiedTable {
    let total = tables.iter().map(UnifiedTable::len).sum();
    let mut records = Vec::with_capacity(total);
    for table in tables {
        records.extend(table.records);
    }
    debug!(sources_rows = total, "Merged sources");
    UnifiedTable::new(records)
}
