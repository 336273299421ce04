//! Validation entry point: group, derive, merge, then check.

use std::collections::BTreeSet;

use pipeline::{GroupId, GroupingConfig, Pipeline, PipelineName, Timestamp, ValidationRunId};
use tracing::{debug, info_span};

use crate::{check_machine_tags, find_cycle, GroupingPlan, ValidationReport};

/// Validates the tag grouping of `pipeline` under `config`.
///
/// Runs the full chain over a fresh snapshot: group nodes by grouping tag,
/// project dependencies onto groups, merge tags per group, then search for a
/// cycle and flag groups with more than one machine tag. Never fails; see
/// [`ValidationReport::ensure_acyclic`] for strict enforcement.
pub fn validate_tag_grouping(
    name: &PipelineName,
    pipeline: &Pipeline,
    config: &GroupingConfig,
) -> ValidationReport {
    let run_id = ValidationRunId::new_random();
    let span = info_span!("validate_tag_grouping", pipeline = %name, run_id = %run_id);
    let _guard = span.enter();

    let plan = GroupingPlan::build(pipeline, config);
    let multi_machine_groups = check_machine_tags(&plan.group_tags(), &config.machine_prefix);
    let (offending, diagnostic_path) = find_cycle(&plan.group_dependencies, &plan.all_group_ids());

    debug!(
        nodes = pipeline.len(),
        groups = plan.groups.len(),
        group_edges = plan.group_dependencies.values().map(BTreeSet::len).sum::<usize>(),
        offending = ?offending,
        "Tag grouping validated"
    );

    ValidationReport {
        run_id,
        pipeline: name.clone(),
        validated_at: Timestamp::now(),
        offending,
        diagnostic_path,
        multi_machine_groups,
        plan,
    }
}

/// Validates `pipeline` with the default prefixes and returns
/// `(offending_group, diagnostic_path)`.
pub fn validate(pipeline: &Pipeline) -> (Option<GroupId>, BTreeSet<GroupId>) {
    let name = PipelineName::default_pipeline();
    let report = validate_tag_grouping(&name, pipeline, &GroupingConfig::default());
    (report.offending, report.diagnostic_path)
}
