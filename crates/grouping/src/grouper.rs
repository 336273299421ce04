//! Partitioning nodes into export groups by grouping tag.

use std::collections::{BTreeMap, BTreeSet};

use pipeline::{GroupId, NodeName, TagSet};
use tracing::warn;

/// Node name → owning group id.
///
/// Every node has an entry. Ungrouped nodes map to a singleton group named
/// after themselves.
pub type GroupTranslator = BTreeMap<NodeName, GroupId>;

/// Group id → member node names, for groups named by a grouping tag only.
pub type TagGroups = BTreeMap<GroupId, BTreeSet<NodeName>>;

/// Groups nodes by the tags that start with `grouping_prefix`.
///
/// Tag sets iterate in lexicographic order, so a node carrying several
/// grouping tags joins every one of those groups' member sets but its
/// translator entry ends on the greatest tag. That case is logged.
pub fn group_nodes_with_tags(
    node_tags: &BTreeMap<NodeName, TagSet>,
    grouping_prefix: &str,
) -> (GroupTranslator, TagGroups) {
    let mut translator: GroupTranslator = node_tags
        .keys()
        .map(|node| (node.clone(), GroupId::from(node)))
        .collect();
    let mut groups = TagGroups::new();

    for (node, tags) in node_tags {
        let mut grouping_tags = 0usize;
        for tag in tags.iter().filter(|tag| tag.has_prefix(grouping_prefix)) {
            let group = GroupId::from(tag);
            groups.entry(group.clone()).or_default().insert(node.clone());
            translator.insert(node.clone(), group);
            grouping_tags += 1;
        }

        if grouping_tags > 1 {
            warn!(
                node = %node,
                chosen_group = %translator[node],
                grouping_tags,
                "Node has multiple grouping tags; the lexicographically last one decides its group"
            );
        }
    }

    (translator, groups)
}
