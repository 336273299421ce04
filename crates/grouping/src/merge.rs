//! Aggregating member tags onto their group.

use std::collections::BTreeMap;

use pipeline::{GroupId, NodeName, TagSet};

use crate::TagGroups;

/// Returns the combined tag mapping: every node's own tags keyed by its name,
/// overwritten or extended by each group's union of member tags.
///
/// Nodes outside any tag group keep their node-level tags under their own
/// name, which is also their singleton group id.
pub fn merge_group_tags(
    node_tags: &BTreeMap<NodeName, TagSet>,
    groups: &TagGroups,
) -> BTreeMap<GroupId, TagSet> {
    let mut merged: BTreeMap<GroupId, TagSet> = node_tags
        .iter()
        .map(|(node, tags)| (GroupId::from(node), tags.clone()))
        .collect();

    for (group, members) in groups {
        let union = members
            .iter()
            .filter_map(|member| node_tags.get(member))
            .flatten()
            .cloned()
            .collect();
        merged.insert(group.clone(), union);
    }

    merged
}
