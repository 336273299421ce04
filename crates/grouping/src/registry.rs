//! Named pipelines validated together at registration time.

use std::collections::BTreeMap;

use pipeline::{GroupingConfig, Node, Pipeline, PipelineError, PipelineName};
use serde::Deserialize;
use tracing::{error, info};

use crate::{validate_tag_grouping, ValidationReport};

/// The set of pipelines a project registers, plus the prefixes they are
/// validated under.
#[derive(Debug, Clone, Default)]
pub struct PipelineRegistry {
    config: GroupingConfig,
    pipelines: BTreeMap<PipelineName, Pipeline>,
}

#[derive(Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    config: GroupingConfig,
    #[serde(default)]
    pipelines: BTreeMap<PipelineName, Vec<Node>>,
}

impl PipelineRegistry {
    /// Creates an empty registry after validating `config`.
    pub fn new(config: GroupingConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            pipelines: BTreeMap::new(),
        })
    }

    /// Loads a registry from a JSON document of the form
    /// `{"config": {...}, "pipelines": {"name": [nodes...]}}`.
    ///
    /// Malformed JSON is a [`PipelineError::ConfigurationError`]; a pipeline
    /// that parses but is not a valid snapshot keeps its own variant.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let document: RegistryDocument =
            serde_json::from_str(json).map_err(|e| PipelineError::ConfigurationError {
                message: e.to_string(),
            })?;
        let mut registry = Self::new(document.config)?;
        for (name, nodes) in document.pipelines {
            registry.register(name, Pipeline::new(nodes)?);
        }
        Ok(registry)
    }

    /// The prefixes pipelines are validated under.
    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Adds or replaces a pipeline, returning the one it replaced.
    pub fn register(&mut self, name: PipelineName, pipeline: Pipeline) -> Option<Pipeline> {
        self.pipelines.insert(name, pipeline)
    }

    /// Looks up a pipeline by name.
    pub fn get(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.get(name)
    }

    /// Registered pipeline names in order.
    pub fn names(&self) -> impl Iterator<Item = &PipelineName> {
        self.pipelines.keys()
    }

    /// Number of registered pipelines.
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Registers `"__default__"` as the union of every other pipeline whose
    /// name is not in `exclude`, replacing any previous default.
    pub fn register_default(&mut self, exclude: &[&str]) -> Result<&Pipeline, PipelineError> {
        let default_name = PipelineName::default_pipeline();
        let mut combined = Pipeline::default();
        for (name, pipeline) in &self.pipelines {
            if *name == default_name || exclude.contains(&name.as_str()) {
                continue;
            }
            combined = combined.merge(pipeline)?;
        }
        self.pipelines.insert(default_name.clone(), combined);
        Ok(&self.pipelines[&default_name])
    }

    /// Validates every registered pipeline once.
    ///
    /// A cyclic grouping is logged as an error but does not stop the pass;
    /// every report is returned for the caller to act on.
    pub fn validate_all(&self) -> Vec<ValidationReport> {
        info!(pipelines = self.pipelines.len(), "Validating pipelines tagging");

        self.pipelines
            .iter()
            .map(|(name, pipeline)| {
                let report = validate_tag_grouping(name, pipeline, &self.config);
                if let Err(err) = report.ensure_acyclic() {
                    error!(pipeline = %name, run_id = %report.run_id, "{err}");
                }
                report
            })
            .collect()
    }
}
