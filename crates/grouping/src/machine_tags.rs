//! Advisory check for groups carrying more than one machine tag.

use std::collections::BTreeMap;

use pipeline::{GroupId, TagSet};
use tracing::warn;

/// Returns the groups whose tags include more than one `machine_prefix` tag,
/// logging a warning for each.
///
/// A group's machine tag selects the worker it runs on, so two of them leave
/// the choice undefined. The check is advisory and never fails validation.
pub fn check_machine_tags(
    group_tags: &BTreeMap<GroupId, TagSet>,
    machine_prefix: &str,
) -> Vec<GroupId> {
    group_tags
        .iter()
        .filter_map(|(group, tags)| {
            let machine_tags: Vec<&str> = tags
                .iter()
                .filter(|tag| tag.has_prefix(machine_prefix))
                .map(|tag| tag.as_str())
                .collect();
            if machine_tags.len() > 1 {
                warn!(
                    group = %group,
                    ?machine_tags,
                    "Group has multiple machine tags; use only one machine tag per group"
                );
                Some(group.clone())
            } else {
                None
            }
        })
        .collect()
}
