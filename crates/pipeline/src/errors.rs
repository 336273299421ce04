//! Error types for building a pipeline snapshot and its configuration.
//!
//! [`PipelineError`] covers malformed collaborator input detected while a
//! [`crate::Pipeline`] or [`crate::GroupingConfig`] is being constructed.
//! Grouping outcomes (cycles, conflicting machine tags) are not errors; they
//! are reported as values by the `grouping` crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DatasetName, NodeName};

/// Errors raised while constructing a pipeline snapshot or its configuration.
///
/// The grouping algorithms assume well-formed input; these checks run once at
/// construction so the algorithms never see a snapshot that violates them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PipelineError {
    /// An identifier was built from an empty string.
    #[error("Empty {kind} identifier")]
    EmptyIdentifier {
        /// Name of the identifier type (e.g. `"NodeName"`).
        kind: String,
    },

    /// Two nodes in the same pipeline share a name.
    #[error("Duplicate node name: {name}")]
    DuplicateNode {
        /// The repeated node name.
        name: NodeName,
    },

    /// Two nodes in the same pipeline produce the same dataset.
    ///
    /// The producer of a dataset must be unique for dependencies to be derived
    /// from it.
    #[error("Dataset '{dataset}' is produced by both '{first}' and '{second}'")]
    DuplicateOutput {
        /// The dataset with more than one producer.
        dataset: DatasetName,
        /// The producer registered first.
        first: NodeName,
        /// The producer that collided with it.
        second: NodeName,
    },

    /// A node consumes a dataset it produces itself.
    #[error("Node '{node}' consumes its own output '{dataset}'")]
    SelfDependency {
        /// The offending node.
        node: NodeName,
        /// The dataset that is both input and output.
        dataset: DatasetName,
    },

    /// Two pipelines being merged define the same node name differently.
    #[error("Conflicting definitions for node '{name}'")]
    ConflictingNode {
        /// The node name with two definitions.
        name: NodeName,
    },

    /// The grouping configuration is invalid or could not be parsed.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}
