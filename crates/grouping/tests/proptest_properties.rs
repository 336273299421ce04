//! Property-Based Testing for tag grouping
//!
//! Uses proptest over randomly generated pipelines and group graphs.
//! Coverage targets:
//! - Grouping determinism (grouper.rs)
//! - Tag union per group (merge.rs)
//! - Cycle search soundness and coverage (cycle.rs)

mod support;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use grouping::{
    find_cycle, group_dependencies, group_nodes_with_tags, merge_group_tags, GroupDependencies,
    GroupingPlan,
};
use pipeline::{GroupId, GroupingConfig, Node, Pipeline};
use proptest::prelude::*;
use support::{group, node};

// =============================================================================
// GENERATORS
// =============================================================================

/// A node-level DAG: `n` nodes, edges only from lower to higher index, and
/// per-node grouping and machine tags.
#[derive(Debug, Clone)]
struct RandomPipeline {
    edges: Vec<(usize, usize)>,
    groups: Vec<Option<u8>>,
    machines: Vec<Option<u8>>,
}

impl RandomPipeline {
    fn build(&self) -> Pipeline {
        let nodes: Vec<Node> = (0..self.groups.len())
            .map(|i| {
                let mut tags = vec![format!("plain:{}", i % 2)];
                if let Some(g) = self.groups[i] {
                    tags.push(format!("airflow:g{g}"));
                }
                if let Some(m) = self.machines[i] {
                    tags.push(format!("machine:m{m}"));
                }
                let inputs: Vec<String> = self
                    .edges
                    .iter()
                    .filter(|(_, child)| *child == i)
                    .map(|(parent, _)| format!("d{parent}"))
                    .collect();

                let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
                let output = format!("d{i}");
                node(&format!("n{i}"), &tags, &inputs, &[output.as_str()])
            })
            .collect();
        Pipeline::new(nodes).unwrap()
    }
}

prop_compose! {
    fn arb_pipeline()(n in 1usize..10)(
        edges in prop::collection::vec((0..n, 0..n), 0..(n * 2)),
        groups in prop::collection::vec(prop::option::of(0u8..3), n),
        machines in prop::collection::vec(prop::option::of(0u8..3), n),
    ) -> RandomPipeline {
        let edges = edges
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        RandomPipeline { edges, groups, machines }
    }
}

prop_compose! {
    /// A group graph whose edges all point from lower to higher index.
    fn arb_acyclic_groups()(m in 1usize..12)(
        pairs in prop::collection::vec((0..m, 0..m), 0..(m * 3)),
        m in Just(m),
    ) -> (GroupDependencies, BTreeSet<GroupId>) {
        let ids: BTreeSet<GroupId> = (0..m).map(|i| group(&format!("g{i:02}"))).collect();
        let mut deps = GroupDependencies::new();
        for (a, b) in pairs.into_iter().filter(|(a, b)| a != b) {
            let (low, high) = (a.min(b), a.max(b));
            deps.entry(group(&format!("g{low:02}")))
                .or_default()
                .insert(group(&format!("g{high:02}")));
        }
        (deps, ids)
    }
}

prop_compose! {
    /// An acyclic group graph plus a disjoint ring of `len` groups.
    fn arb_cyclic_groups()((deps, ids) in arb_acyclic_groups(), len in 1usize..5) -> (GroupDependencies, BTreeSet<GroupId>) {
        let mut deps = deps;
        let mut ids = ids;
        let ring: Vec<GroupId> = (0..len).map(|i| group(&format!("ring{i}"))).collect();
        for (i, id) in ring.iter().enumerate() {
            ids.insert(id.clone());
            deps.entry(id.clone()).or_default().insert(ring[(i + 1) % len].clone());
        }
        (deps, ids)
    }
}

fn reaches(deps: &GroupDependencies, from: &GroupId, to: &GroupId) -> bool {
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<&GroupId> = deps.get(from).into_iter().flatten().collect();
    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        if seen.insert(current) {
            queue.extend(deps.get(current).into_iter().flatten());
        }
    }
    false
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Property: grouping the same tags twice yields identical mappings
    #[test]
    fn test_grouping_is_deterministic(random in arb_pipeline()) {
        let node_tags = random.build().node_tags();

        let first = group_nodes_with_tags(&node_tags, "airflow:");
        let second = group_nodes_with_tags(&node_tags, "airflow:");

        prop_assert_eq!(first, second);
    }

    /// Property: every node maps to exactly one group, and grouped nodes are
    /// members of the group they map to
    #[test]
    fn test_translator_covers_every_node(random in arb_pipeline()) {
        let node_tags = random.build().node_tags();

        let (translator, groups) = group_nodes_with_tags(&node_tags, "airflow:");

        prop_assert_eq!(translator.len(), node_tags.len());
        for (node, group) in &translator {
            match groups.get(group) {
                Some(members) => prop_assert!(members.contains(node)),
                None => prop_assert_eq!(group.as_str(), node.as_str()),
            }
        }
    }

    /// Property: a group's tags are exactly the union of its members' tags
    #[test]
    fn test_group_tags_are_member_union(random in arb_pipeline()) {
        let node_tags = random.build().node_tags();
        let (_, groups) = group_nodes_with_tags(&node_tags, "airflow:");

        let merged = merge_group_tags(&node_tags, &groups);

        for (group, members) in &groups {
            let union: BTreeSet<_> = members
                .iter()
                .flat_map(|m| node_tags[m].iter().cloned())
                .collect();
            prop_assert_eq!(&merged[group], &union);
            for member in members {
                prop_assert!(node_tags[member].is_subset(&merged[group]));
            }
        }
    }

    /// Property: no group depends on itself through an intra-group edge
    #[test]
    fn test_group_dependencies_have_no_self_edges(random in arb_pipeline()) {
        let pipeline = random.build();
        let (translator, _) = group_nodes_with_tags(&pipeline.node_tags(), "airflow:");

        let (names, deps) = group_dependencies(&pipeline.parent_to_children(), &translator);

        for (parent, children) in &deps {
            prop_assert!(!children.contains(parent));
            prop_assert!(!children.is_empty());
            prop_assert!(names.contains(parent));
            prop_assert!(children.is_subset(&names));
        }
    }

    /// Property: without grouping tags the collapsed graph is the node DAG,
    /// so no cycle is ever reported
    #[test]
    fn test_ungrouped_pipelines_never_cycle(random in arb_pipeline()) {
        let ungrouped = RandomPipeline { groups: vec![None; random.groups.len()], ..random };
        let plan = GroupingPlan::build(&ungrouped.build(), &GroupingConfig::default());

        let (offending, visited) = find_cycle(&plan.group_dependencies, &plan.all_group_ids());

        prop_assert_eq!(offending, None);
        prop_assert_eq!(visited, plan.all_group_ids());
    }

    /// Property: acyclic group graphs yield no offender and visit every group
    #[test]
    fn test_acyclic_graphs_visit_everything((deps, ids) in arb_acyclic_groups()) {
        let (offending, visited) = find_cycle(&deps, &ids);

        prop_assert_eq!(offending, None);
        prop_assert!(visited.is_superset(&ids));
    }

    /// Property: cyclic group graphs yield an offender that lies on a cycle
    #[test]
    fn test_cyclic_graphs_report_a_group_on_a_cycle((deps, ids) in arb_cyclic_groups()) {
        let (offending, path) = find_cycle(&deps, &ids);

        let offending = offending.expect("a cycle exists");
        prop_assert!(reaches(&deps, &offending, &offending));
        prop_assert!(path.contains(&offending));
    }

    /// Property: building the plan twice gives the same plan and verdict
    #[test]
    fn test_validation_is_stable_across_runs(random in arb_pipeline()) {
        let pipeline = random.build();
        let config = GroupingConfig::default();

        let first = GroupingPlan::build(&pipeline, &config);
        let second = GroupingPlan::build(&pipeline, &config);

        prop_assert_eq!(&first, &second);
        let first_cycle = find_cycle(&first.group_dependencies, &first.all_group_ids());
        let second_cycle = find_cycle(&second.group_dependencies, &second.all_group_ids());
        prop_assert_eq!(first_cycle, second_cycle);
    }
}

#[test]
fn test_reaches_helper() {
    let deps: GroupDependencies = BTreeMap::from([
        (group("a"), BTreeSet::from([group("b")])),
        (group("b"), BTreeSet::from([group("a")])),
    ]);
    assert!(reaches(&deps, &group("a"), &group("a")));
    assert!(!reaches(&deps, &group("a"), &group("c")));
}
