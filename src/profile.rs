//! Per-source column mappings.
//!
//! Every database export differs only in column names and a couple of
//! cleanup flags, so a source is described by data rather than code. Adding
//! a database means adding a profile.

use serde::{Deserialize, Serialize};

/// Label used for Web of Science rows (no label column in that export)
pub const WEB_OF_SCIENCE: &str = "Web of Science";
/// Label carried in the Scopus `Source` column
pub const SCOPUS: &str = "Scopus";
/// Label carried in the Dimensions `Source` column
pub const DIMENSIONS: &str = "Dimensions";

/// How the year column is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearFormat {
    /// A bare year, e.g. `2020`
    #[default]
    Year,
    /// A full publication date, e.g. `2021-05-01`
    Date,
}

/// Raw column names of one export and how to clean them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Reporting label; injected as `Database` when `label_column` is unset
    pub name: String,
    pub authors: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub year_format: YearFormat,
    pub citations: String,
    /// Column whose value becomes `Database`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_column: Option<String>,
    /// Drop `(...)` annotations such as author IDs from the author field
    #[serde(default)]
    pub strip_parentheticals: bool,
}

impl SourceProfile {
    /// Database A: Web of Science full-record export
    pub fn web_of_science() -> Self {
        Self {
            name: WEB_OF_SCIENCE.to_string(),
            authors: "Authors".to_string(),
            title: "Article Title".to_string(),
            year: "Publication Year".to_string(),
            year_format: YearFormat::Year,
            citations: "Times Cited, All Databases".to_string(),
            label_column: None,
            strip_parentheticals: false,
        }
    }

    /// Database B: Scopus CSV export, authors carry `(author id)` suffixes
    pub fn scopus() -> Self {
        Self {
            name: SCOPUS.to_string(),
            authors: "Author full names".to_string(),
            title: "Title".to_string(),
            year: "Year".to_string(),
            year_format: YearFormat::Year,
            citations: "Cited by".to_string(),
            label_column: Some("Source".to_string()),
            strip_parentheticals: true,
        }
    }

    /// Database C: Dimensions export with a full publication date
    pub fn dimensions() -> Self {
        Self {
            name: DIMENSIONS.to_string(),
            authors: "Authors".to_string(),
            title: "Title".to_string(),
            year: "Publication Date".to_string(),
            year_format: YearFormat::Date,
            citations: "Times cited".to_string(),
            label_column: Some("Source".to_string()),
            strip_parentheticals: false,
        }
    }

    /// The three built-in profiles, in merge order
    pub fn builtin() -> Vec<Self> {
        vec![Self::web_of_science(), Self::scopus(), Self::dimensions()]
    }

    /// Raw columns the adapter must find, in unified order
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![
            self.authors.as_str(),
            self.title.as_str(),
            self.year.as_str(),
            self.citations.as_str(),
        ];
        if let Some(label) = &self.label_column {
            columns.push(label.as_str());
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_flags() {
        let profiles = SourceProfile::builtin();
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec![WEB_OF_SCIENCE, SCOPUS, DIMENSIONS]);

        assert!(profiles[0].label_column.is_none());
        assert!(profiles[1].strip_parentheticals);
        assert_eq!(profiles[2].year_format, YearFormat::Date);
    }

    #[test]
    fn test_required_columns_include_label() {
        assert_eq!(SourceProfile::web_of_science().required_columns().len(), 4);
        assert_eq!(
            SourceProfile::scopus().required_columns(),
            vec!["Author full names", "Title", "Year", "Cited by", "Source"]
        );
    }

    #[test]
    fn test_profile_from_toml_defaults() -> Result<(), toml::de::Error> {
        let profile: SourceProfile = toml::from_str(
            r#"
            name = "PubMed"
            authors = "Authors"
            title = "Title"
            year = "Publication Year"
            citations = "Citations"
            "#,
        )?;
        assert_eq!(profile.year_format, YearFormat::Year);
        assert!(profile.label_column.is_none());
        assert!(!profile.strip_parentheticals);
        Ok(())
    }
}
