//! End-to-end run: load -> adapt -> merge -> deduplicate -> summarize.

use crate::adapter::adapt;
use crate::config::PipelineConfig;
use crate::dedup::{deduplicate, Deduplication};
use crate::error::Result;
use crate::loader::load;
use crate::merge::merge;
use crate::report::{summarize, Summary};
use tracing::info;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub dedup: Deduplication,
    pub summary: Summary,
}

/// Run the whole pipeline.
///
/// Sources are processed in config order. The first source that fails to
/// load or adapt aborts the run; nothing is deduplicated from a partial set.
pub fn run(config: &PipelineConfig) -> Result<ReviewOutcome> {
    config.validate()?;

    let mut tables = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        info!(source = %source.profile.name, path = %source.path.display(), "Processing source");
        let raw = load(&source.path)?;
        tables.push(adapt(&raw, &source.profile)?);
    }

    let merged = merge(tables);
    let dedup = deduplicate(merged);
    let summary = summarize(&dedup, &config.labels());

    Ok(ReviewOutcome { dedup, summary })
}
