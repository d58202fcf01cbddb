//! Report definition, usually read from a TOML file:
//!
//! ```toml
//! start = "2025-01-01"
//! end = "2025-02-01"
//! idle_bucket_id = "VAC"
//! idle_bucket_name = "Vacation"
//!
//! [tags]
//! resource = "ClarityRID"
//!
//! [resources]
//! exclude = ["contractor"]
//!
//! [output]
//! format = "xog"
//! precision = 2
//! ```

use crate::interval::{EmptyIntervalError, ReportInterval};
use crate::source::ListFilter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid report definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Interval(#[from] EmptyIntervalError),

    #[error("{field} may not be empty")]
    EmptyValue { field: &'static str },

    #[error("unknown output format '{0}' (expected html, xog, csv or text)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub start: NaiveDate,
    /// Exclusive end of the reporting interval.
    pub end: NaiveDate,
    #[serde(default)]
    pub scenario: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_bucket_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_bucket_name: Option<String>,
    #[serde(default)]
    pub tags: TagNames,
    #[serde(default)]
    pub resources: ListFilter,
    #[serde(default)]
    pub tasks: ListFilter,
    #[serde(default)]
    pub output: OutputOptions,
}

/// Names of the custom attributes linking schedule entities to the external system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagNames {
    pub resource: String,
    pub project_id: String,
    pub project_name: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            resource: "ClarityRID".to_string(),
            project_id: "ClarityPID".to_string(),
            project_name: "ClarityPName".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Xog,
    Csv,
    Text,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "xog" | "niku" => Ok(OutputFormat::Xog),
            "csv" => Ok(OutputFormat::Csv),
            "text" | "table" => Ok(OutputFormat::Text),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Fraction digits of rendered allocation values.
    pub precision: usize,
    /// Installation specific XML inserted verbatim into every XOG project element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_info: Option<String>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            precision: 2,
            custom_info: None,
        }
    }
}

/// Identity of the synthetic bucket collecting unallocated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleBucket<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

impl ReportConfig {
    pub fn new(interval: ReportInterval) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            scenario: 0,
            idle_bucket_id: None,
            idle_bucket_name: None,
            tags: TagNames::default(),
            resources: ListFilter::default(),
            tasks: ListFilter::default(),
            output: OutputOptions::default(),
        }
    }

    pub fn with_idle_bucket(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.idle_bucket_id = Some(id.into());
        self.idle_bucket_name = Some(name.into());
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ReportConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn interval(&self) -> Result<ReportInterval, ConfigError> {
        Ok(ReportInterval::new(self.start, self.end)?)
    }

    /// The idle bucket is only enabled when both its id and its name are configured.
    pub fn idle_bucket(&self) -> Option<IdleBucket<'_>> {
        match (&self.idle_bucket_id, &self.idle_bucket_name) {
            (Some(id), Some(name)) => Some(IdleBucket { id, name }),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.interval()?;
        let required = [
            ("idle_bucket_id", self.idle_bucket_id.as_deref()),
            ("idle_bucket_name", self.idle_bucket_name.as_deref()),
            ("tags.resource", Some(self.tags.resource.as_str())),
            ("tags.project_id", Some(self.tags.project_id.as_str())),
            ("tags.project_name", Some(self.tags.project_name.as_str())),
        ];
        for (field, value) in required {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::EmptyValue { field });
            }
        }
        if self.idle_bucket_id.is_some() != self.idle_bucket_name.is_some() {
            tracing::warn!(
                idle_bucket_id = ?self.idle_bucket_id,
                idle_bucket_name = ?self.idle_bucket_name,
                "idle bucket needs both id and name, ignoring it"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SortOrder;

    #[test]
    fn minimal_definition_uses_defaults() {
        let config = ReportConfig::from_toml_str("start = \"2025-01-01\"\nend = \"2025-02-01\"\n").unwrap();
        assert_eq!(config.scenario, 0);
        assert_eq!(config.tags, TagNames::default());
        assert_eq!(config.output.precision, 2);
        assert_eq!(config.output.format, OutputFormat::Html);
        assert!(config.idle_bucket().is_none());
    }

    #[test]
    fn full_definition_parses() {
        let input = r#"
            start = "2025-03-01"
            end = "2025-04-01"
            scenario = 1
            idle_bucket_id = "VAC"
            idle_bucket_name = "Vacation"

            [tags]
            resource = "ExtRID"

            [resources]
            exclude = ["boss"]
            sort = "name"

            [output]
            format = "csv"
            precision = 3
        "#;
        let config = ReportConfig::from_toml_str(input).unwrap();
        assert_eq!(config.scenario, 1);
        assert_eq!(
            config.idle_bucket(),
            Some(IdleBucket {
                id: "VAC",
                name: "Vacation"
            })
        );
        assert_eq!(config.tags.resource, "ExtRID");
        assert_eq!(config.tags.project_id, "ClarityPID");
        assert_eq!(config.resources.exclude, vec!["boss".to_string()]);
        assert_eq!(config.resources.sort, SortOrder::Name);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.precision, 3);
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let reversed = "start = \"2025-02-01\"\nend = \"2025-01-01\"\n";
        assert!(matches!(
            ReportConfig::from_toml_str(reversed),
            Err(ConfigError::Interval(_))
        ));

        let empty_idle = "start = \"2025-01-01\"\nend = \"2025-02-01\"\nidle_bucket_id = \"\"\nidle_bucket_name = \"Off\"\n";
        assert!(matches!(
            ReportConfig::from_toml_str(empty_idle),
            Err(ConfigError::EmptyValue {
                field: "idle_bucket_id"
            })
        ));

        let unknown = "start = \"2025-01-01\"\nend = \"2025-02-01\"\ncolour = \"red\"\n";
        assert!(matches!(
            ReportConfig::from_toml_str(unknown),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn idle_bucket_needs_both_parts() {
        let input = "start = \"2025-01-01\"\nend = \"2025-02-01\"\nidle_bucket_id = \"VAC\"\n";
        let config = ReportConfig::from_toml_str(input).unwrap();
        assert!(config.idle_bucket().is_none());
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("XOG".parse::<OutputFormat>().unwrap(), OutputFormat::Xog);
        assert_eq!("niku".parse::<OutputFormat>().unwrap(), OutputFormat::Xog);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
