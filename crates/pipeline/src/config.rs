//! Tag-prefix conventions used by the grouping validator.

use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Default prefix marking a tag as a grouping tag.
pub const DEFAULT_GROUPING_PREFIX: &str = "airflow:";

/// Default prefix marking a tag as a machine/resource-affinity tag.
pub const DEFAULT_MACHINE_PREFIX: &str = "machine:";

/// Prefix conventions applied to node tags.
///
/// Missing fields take their defaults when deserialised, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Tags starting with this prefix assign a node to an export group.
    pub grouping_prefix: String,
    /// Tags starting with this prefix state a machine affinity.
    pub machine_prefix: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            grouping_prefix: DEFAULT_GROUPING_PREFIX.to_string(),
            machine_prefix: DEFAULT_MACHINE_PREFIX.to_string(),
        }
    }
}

impl GroupingConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PipelineError::ConfigurationError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both prefixes are non-empty and distinct.
    ///
    /// An empty prefix would match every tag; identical prefixes would make
    /// every grouping tag a machine tag as well.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.grouping_prefix.is_empty() {
            return Err(PipelineError::ConfigurationError {
                message: "grouping_prefix must not be empty".to_string(),
            });
        }
        if self.machine_prefix.is_empty() {
            return Err(PipelineError::ConfigurationError {
                message: "machine_prefix must not be empty".to_string(),
            });
        }
        if self.grouping_prefix == self.machine_prefix {
            return Err(PipelineError::ConfigurationError {
                message: format!(
                    "grouping_prefix and machine_prefix must differ (both are '{}')",
                    self.grouping_prefix
                ),
            });
        }
        Ok(())
    }
}
