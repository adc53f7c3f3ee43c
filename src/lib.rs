//! # rustlitreview
//!
//! Merge literature-database exports and remove duplicate studies for a
//! systematic review.
//!
//! ## Modules
//!
//! - [`loader`] - CSV / spreadsheet loading into raw tables
//! - [`profile`] - Per-database column mappings
//! - [`adapter`] - Raw table -> unified records, text normalization
//! - [`merge`] - Concatenation of adapted sources
//! - [`dedup`] - Citation-priority duplicate removal
//! - [`report`] - Counts and table rendering
//! - [`pipeline`] - End-to-end run over a [`config::PipelineConfig`]
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustlitreview::{config::PipelineConfig, pipeline, report};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = PipelineConfig::builtin(
//!         "wos.csv".into(),
//!         "scopus.csv".into(),
//!         "dimensions.xlsx".into(),
//!     );
//!     let outcome = pipeline::run(&config)?;
//!     print!("{}", outcome.summary);
//!     println!("{}", report::render_table(&outcome.dedup.table));
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod config;
pub mod dedup;
pub mod error;
pub mod export;
pub mod loader;
pub mod merge;
pub mod pipeline;
pub mod profile;
pub mod record;
pub mod report;

pub use error::{ReviewError, Result};
