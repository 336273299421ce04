//! Pipeline snapshot model for tag-based task grouping.
//!
//! This crate holds every domain concept the grouping validator works on:
//! newtype identifiers, the in-memory [`Pipeline`] snapshot supplied by the
//! pipeline-definition layer, the tag-prefix [`GroupingConfig`], and the
//! construction-time error type.
//!
//! ## Architectural Layer
//!
//! **Domain model.** This crate has no I/O dependencies. The `grouping`
//! crate implements the algorithms over these types.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`NodeName`, `Tag`, `GroupId`, etc.) |
//! | [`model`] | `Node` and `Pipeline` snapshot, dependency derivation |
//! | [`config`] | Grouping and machine tag prefixes |
//! | [`types`] | Shared value types (`TagSet`, `Timestamp`) |
//! | [`errors`] | Snapshot and configuration errors |

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod model;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{GroupingConfig, DEFAULT_GROUPING_PREFIX, DEFAULT_MACHINE_PREFIX};
pub use errors::PipelineError;
pub use identifiers::{
    DatasetName, GroupId, NodeName, PipelineName, Tag, ValidationRunId, DEFAULT_PIPELINE,
};
pub use model::{Node, NodeDependencies, Pipeline};
pub use types::{TagSet, Timestamp};
