//! The collapsed graph handed to the external orchestrator.

use std::collections::{BTreeMap, BTreeSet};

use pipeline::{GroupId, GroupingConfig, NodeName, Pipeline, TagSet};
use serde::Serialize;

use crate::{
    group_dependencies, group_nodes_with_tags, merge_group_tags, GroupDependencies,
    GroupTranslator, TagGroups,
};

/// Everything derived from one pipeline snapshot by grouping its nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingPlan {
    /// Node → owning group.
    pub translator: GroupTranslator,
    /// Tag-named groups and their members.
    pub groups: TagGroups,
    /// Every group id seen on a dependency edge.
    pub task_names: BTreeSet<GroupId>,
    /// Inter-group edges, parent → children.
    pub group_dependencies: GroupDependencies,
    /// Node tags keyed by node name, overwritten per group by the union of
    /// member tags.
    pub merged_tags: BTreeMap<GroupId, TagSet>,
}

impl GroupingPlan {
    /// Groups `pipeline` according to `config.grouping_prefix`.
    pub fn build(pipeline: &Pipeline, config: &GroupingConfig) -> Self {
        let node_tags = pipeline.node_tags();
        let (translator, groups) = group_nodes_with_tags(&node_tags, &config.grouping_prefix);
        let (task_names, group_dependencies) =
            group_dependencies(&pipeline.parent_to_children(), &translator);
        let merged_tags = merge_group_tags(&node_tags, &groups);

        Self {
            translator,
            groups,
            task_names,
            group_dependencies,
            merged_tags,
        }
    }

    /// The group `node` was assigned to.
    pub fn group_of(&self, node: &NodeName) -> Option<&GroupId> {
        self.translator.get(node)
    }

    /// Every group id: those on dependency edges plus isolated nodes' groups.
    pub fn all_group_ids(&self) -> BTreeSet<GroupId> {
        self.task_names
            .iter()
            .chain(self.translator.values())
            .cloned()
            .collect()
    }

    /// Merged tags restricted to actual groups, dropping entries for nodes
    /// that were absorbed into a tag group.
    pub fn group_tags(&self) -> BTreeMap<GroupId, TagSet> {
        let ids = self.all_group_ids();
        self.merged_tags
            .iter()
            .filter(|(id, _)| ids.contains(*id))
            .map(|(id, tags)| (id.clone(), tags.clone()))
            .collect()
    }
}
