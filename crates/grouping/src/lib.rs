//! Tag-based grouping of pipeline nodes for orchestrator export.
//!
//! A fine-grained task pipeline is collapsed into coarser groups: every node
//! tagged with the grouping prefix (default `"airflow:"`) joins the group named
//! by that tag, and every other node stays a singleton group. The collapsed
//! graph can contain cycles the original did not have, for example when an
//! ungrouped node sits between two members of the same group. This crate
//! derives the collapsed graph and reports such cycles.
//!
//! ## Flow
//!
//! ```text
//! Pipeline ─► group_nodes_with_tags ─┬─► group_dependencies ─► find_cycle
//!                                    └─► merge_group_tags ───► check_machine_tags
//! ```
//!
//! [`validate_tag_grouping`] runs the whole chain and returns a
//! [`ValidationReport`]. Validation is advisory: a cycle is a value in the
//! report, and [`ValidationReport::ensure_acyclic`] converts it to an error
//! for callers that enforce it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`grouper`] | Node → group assignment |
//! | [`dependencies`] | Group-level dependency edges |
//! | [`merge`] | Per-group tag union |
//! | [`cycle`] | Cycle search from a synthetic root |
//! | [`machine_tags`] | Multiple-machine-tag warnings |
//! | [`plan`] | The collapsed graph for export |
//! | [`validate`] | Validation entry points |
//! | [`report`] | Validation outcome |
//! | [`registry`] | Named pipelines validated together |
//! | [`errors`] | Strict-enforcement error |

pub mod cycle;
pub mod dependencies;
pub mod errors;
pub mod grouper;
pub mod machine_tags;
pub mod merge;
pub mod plan;
pub mod registry;
pub mod report;
pub mod validate;

pub use cycle::{find_cycle, synthetic_root, SYNTHETIC_ROOT_SEED};
pub use dependencies::{group_dependencies, GroupDependencies};
pub use errors::GroupingError;
pub use grouper::{group_nodes_with_tags, GroupTranslator, TagGroups};
pub use machine_tags::check_machine_tags;
pub use merge::merge_group_tags;
pub use plan::GroupingPlan;
pub use registry::PipelineRegistry;
pub use report::ValidationReport;
pub use validate::{validate, validate_tag_grouping};
