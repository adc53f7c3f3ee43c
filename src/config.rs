//! Pipeline configuration.
//!
//! A run is fully described by a `PipelineConfig`: which files to read and
//! which profile maps each of them. It is either assembled from CLI flags or
//! read from a TOML file.

use crate::error::{ReviewError, Result};
use crate::profile::SourceProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One input file and how to read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub profile: SourceProfile,
}

/// Everything the pipeline needs for a run, in merge order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub sources: Vec<SourceConfig>,
}

impl PipelineConfig {
    /// The three built-in databases with the given export paths
    pub fn builtin(wos: PathBuf, scopus: PathBuf, dimensions: PathBuf) -> Self {
        let paths = [wos, scopus, dimensions];
        Self {
            sources: paths
                .into_iter()
                .zip(SourceProfile::builtin())
                .map(|(path, profile)| SourceConfig { path, profile })
                .collect(),
        }
    }

    /// Parse and validate a TOML config
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config from disk
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading pipeline config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// At least one source, and source names must be distinct
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(ReviewError::Config("no sources configured".to_string()));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.profile.name.as_str()) {
                return Err(ReviewError::Config(format!(
                    "duplicate source name '{}'",
                    source.profile.name
                )));
            }
        }
        Ok(())
    }

    /// Known `Database` labels, in source order
    pub fn labels(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.profile.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::YearFormat;

    #[test]
    fn test_builtin_pairs_paths_with_profiles() {
        let config = PipelineConfig::builtin(
            PathBuf::from("wos.csv"),
            PathBuf::from("scopus.csv"),
            PathBuf::from("dimensions.xlsx"),
        );
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.sources[2].path, PathBuf::from("dimensions.xlsx"));
        assert_eq!(config.sources[2].profile.year_format, YearFormat::Date);
        assert_eq!(config.labels(), vec!["Web of Science", "Scopus", "Dimensions"]);
    }

    #[test]
    fn test_toml_round_trip_of_template() -> Result<()> {
        let config = PipelineConfig::builtin(
            PathBuf::from("a.csv"),
            PathBuf::from("b.csv"),
            PathBuf::from("c.csv"),
        );
        let text = config.to_toml_string()?;
        assert!(text.contains("[[sources]]"));
        assert_eq!(PipelineConfig::from_toml_str(&text)?, config);
        Ok(())
    }

    #[test]
    fn test_fourth_source_from_toml() -> Result<()> {
        let config = PipelineConfig::from_toml_str(
            r#"
            [[sources]]
            path = "pubmed.csv"

            [sources.profile]
            name = "PubMed"
            authors = "Authors"
            title = "Title"
            year = "Create Date"
            year_format = "date"
            citations = "Citations"
            "#,
        )?;
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].profile.year_format, YearFormat::Date);
        Ok(())
    }

    #[test]
    fn test_validate_rejects_empty_and_duplicates() {
        assert!(matches!(
            PipelineConfig { sources: vec![] }.validate(),
            Err(ReviewError::Config(_))
        ));

        let mut config = PipelineConfig::builtin(
            PathBuf::from("a.csv"),
            PathBuf::from("b.csv"),
            PathBuf::from("c.csv"),
        );
        config.sources[2].profile.name = "Scopus".to_string();
        assert!(matches!(config.validate(), Err(ReviewError::Config(_))));
    }
}
