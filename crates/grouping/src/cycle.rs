//! Cycle detection over the group dependency graph.
//!
//! A synthetic root with an edge to every known group is added so that one
//! depth-first search from the root reaches every group, including groups
//! with no incoming edges and disconnected components.

use std::collections::btree_set;
use std::collections::BTreeSet;

use pipeline::GroupId;

use crate::GroupDependencies;

/// Seed for the synthetic root id; wrapped in underscores until unique.
pub const SYNTHETIC_ROOT_SEED: &str = "__start__";

static NO_EDGES: BTreeSet<GroupId> = BTreeSet::new();

/// Picks a root id that is neither a dependency key nor a known group id.
pub fn synthetic_root(
    group_dependencies: &GroupDependencies,
    all_group_ids: &BTreeSet<GroupId>,
) -> GroupId {
    GroupId::unused(SYNTHETIC_ROOT_SEED, |candidate| {
        group_dependencies.contains_key(candidate) || all_group_ids.contains(candidate)
    })
}

/// Searches the group graph for a cycle.
///
/// Returns `(None, visited)` when the graph is acyclic, where `visited` holds
/// every group reached from the synthetic root. Otherwise returns the
/// offending group and the set of groups on the search path at the moment
/// the cycle was found. The synthetic root never appears in either set.
///
/// The offending group is the node itself for a self-loop, or the first
/// child found already on the current path. Children iterate in id order,
/// so the result is deterministic.
pub fn find_cycle(
    group_dependencies: &GroupDependencies,
    all_group_ids: &BTreeSet<GroupId>,
) -> (Option<GroupId>, BTreeSet<GroupId>) {
    let root = synthetic_root(group_dependencies, all_group_ids);

    let mut graph = group_dependencies.clone();
    graph.insert(root.clone(), all_group_ids.clone());

    let mut visited: BTreeSet<&GroupId> = BTreeSet::from([&root]);
    let mut on_path: BTreeSet<&GroupId> = BTreeSet::from([&root]);
    let mut stack = vec![(&root, successors(&graph, &root))];

    while let Some((node, children)) = stack.last_mut() {
        let node = *node;
        match children.next() {
            Some(child) if child == node => {
                return (Some(node.clone()), without_root(on_path, &root));
            }
            Some(child) if on_path.contains(child) => {
                return (Some(child.clone()), without_root(on_path, &root));
            }
            // Fully explored earlier without finding a cycle beneath it.
            Some(child) if visited.contains(child) => {}
            Some(child) => {
                visited.insert(child);
                on_path.insert(child);
                stack.push((child, successors(&graph, child)));
            }
            None => {
                on_path.remove(node);
                stack.pop();
            }
        }
    }

    (None, without_root(visited, &root))
}

fn successors<'g>(graph: &'g GroupDependencies, node: &GroupId) -> btree_set::Iter<'g, GroupId> {
    graph.get(node).unwrap_or(&NO_EDGES).iter()
}

fn without_root(ids: BTreeSet<&GroupId>, root: &GroupId) -> BTreeSet<GroupId> {
    ids.into_iter()
        .filter(|id| *id != root)
        .cloned()
        .collect()
}
