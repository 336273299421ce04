//! Errors produced when a caller opts into strict enforcement.

use std::collections::BTreeSet;

use pipeline::{GroupId, PipelineName};
use thiserror::Error;

/// Raised by [`crate::ValidationReport::ensure_acyclic`].
///
/// Validation itself never fails; a cycle is part of the report. Callers that
/// must refuse a cyclic grouping convert the report with `ensure_acyclic`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingError {
    /// The grouping of nodes creates a cycle among groups.
    #[error(
        "Pipeline {pipeline} has invalid grouping that creates a cycle at '{offending}' regarding nodes: {}",
        join(.path)
    )]
    CycleDetected {
        /// Pipeline the cycle was found in.
        pipeline: PipelineName,
        /// The group where the cycle was detected.
        offending: GroupId,
        /// Groups on the search path when the cycle was detected.
        path: BTreeSet<GroupId>,
    },
}

fn join(ids: &BTreeSet<GroupId>) -> String {
    ids.iter().map(GroupId::as_str).collect::<Vec<_>>().join(", ")
}
