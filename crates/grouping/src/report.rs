//! The outcome of validating one pipeline's tag grouping.

use std::collections::BTreeSet;

use pipeline::{GroupId, PipelineName, Timestamp, ValidationRunId};
use serde::Serialize;

use crate::{GroupingError, GroupingPlan};

/// Result of one validation run.
///
/// A cycle does not make validation fail: it is recorded in [`Self::offending`]
/// and [`Self::diagnostic_path`]. Multi-machine-tag groups are advisory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Correlates this report with the log lines of the same run.
    pub run_id: ValidationRunId,
    /// The validated pipeline.
    pub pipeline: PipelineName,
    /// When validation ran.
    pub validated_at: Timestamp,
    /// The group where a cycle was detected, if any.
    pub offending: Option<GroupId>,
    /// Search path at detection when a cycle was found, otherwise every
    /// visited group.
    pub diagnostic_path: BTreeSet<GroupId>,
    /// Groups carrying more than one machine tag.
    pub multi_machine_groups: Vec<GroupId>,
    /// The collapsed graph the verdict was computed on.
    pub plan: GroupingPlan,
}

impl ValidationReport {
    /// Returns `true` if no cycle was found among groups.
    pub fn is_acyclic(&self) -> bool {
        self.offending.is_none()
    }

    /// The `(offending, diagnostic_path)` pair.
    pub fn outcome(&self) -> (Option<&GroupId>, &BTreeSet<GroupId>) {
        (self.offending.as_ref(), &self.diagnostic_path)
    }

    /// Turns a detected cycle into an error, for callers that enforce
    /// acyclic grouping.
    pub fn ensure_acyclic(&self) -> Result<(), GroupingError> {
        match &self.offending {
            None => Ok(()),
            Some(offending) => Err(GroupingError::CycleDetected {
                pipeline: self.pipeline.clone(),
                offending: offending.clone(),
                path: self.diagnostic_path.clone(),
            }),
        }
    }
}
