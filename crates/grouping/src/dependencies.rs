//! Projecting node-level dependency edges onto groups.

use std::collections::{BTreeMap, BTreeSet};

use pipeline::{GroupId, NodeDependencies, NodeName};

use crate::GroupTranslator;

/// Parent group → child groups.
///
/// Groups without outgoing edges are absent rather than mapped to an empty
/// set.
pub type GroupDependencies = BTreeMap<GroupId, BTreeSet<GroupId>>;

/// Builds the group dependency graph from parent → children node edges.
///
/// Returns every group id seen on either end of an edge, and the inter-group
/// edges. Edges inside one group are dropped; parallel edges collapse.
/// A node missing from `translator` is treated as its own group.
pub fn group_dependencies(
    node_dependencies: &NodeDependencies,
    translator: &GroupTranslator,
) -> (BTreeSet<GroupId>, GroupDependencies) {
    let resolve = |node: &NodeName| {
        translator
            .get(node)
            .cloned()
            .unwrap_or_else(|| GroupId::from(node))
    };

    let mut task_names = BTreeSet::new();
    let mut dependencies = GroupDependencies::new();

    for (parent, children) in node_dependencies {
        let parent_group = resolve(parent);
        task_names.insert(parent_group.clone());

        for child in children {
            let child_group = resolve(child);
            if child_group != parent_group {
                dependencies
                    .entry(parent_group.clone())
                    .or_default()
                    .insert(child_group.clone());
            }
            task_names.insert(child_group);
        }
    }

    (task_names, dependencies)
}
