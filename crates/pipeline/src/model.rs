//! In-memory pipeline snapshot handed over by the pipeline-definition layer.
//!
//! A [`Pipeline`] is a set of uniquely named [`Node`]s. Dependencies are not
//! stored; they follow from datasets (a node depends on the producer of each
//! of its inputs) and are re-derived on demand.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DatasetName, NodeName, PipelineError, Tag, TagSet};

/// Node name → set of node names.
///
/// Used both for the child → parents relation and its parent → children
/// inverse.
pub type NodeDependencies = BTreeMap<NodeName, BTreeSet<NodeName>>;

/// A single task in a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name within the pipeline.
    pub name: NodeName,
    /// Opaque tags, some of which may carry the grouping or machine prefix.
    #[serde(default)]
    pub tags: TagSet,
    /// Datasets this node consumes.
    #[serde(default)]
    pub inputs: BTreeSet<DatasetName>,
    /// Datasets this node produces.
    #[serde(default)]
    pub outputs: BTreeSet<DatasetName>,
}

impl Node {
    /// Creates a node with no tags, inputs, or outputs.
    pub fn new(name: NodeName) -> Self {
        Self {
            name,
            tags: TagSet::new(),
            inputs: BTreeSet::new(),
            outputs: BTreeSet::new(),
        }
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Adds an input dataset.
    pub fn with_input(mut self, dataset: DatasetName) -> Self {
        self.inputs.insert(dataset);
        self
    }

    /// Adds an output dataset.
    pub fn with_output(mut self, dataset: DatasetName) -> Self {
        self.outputs.insert(dataset);
        self
    }
}

/// A validated set of nodes.
///
/// Construction guarantees unique node names, a unique producer per dataset,
/// and no node consuming its own output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Node>", into = "Vec<Node>")]
pub struct Pipeline {
    nodes: BTreeMap<NodeName, Node>,
}

impl Pipeline {
    /// Builds a pipeline from its nodes.
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self, PipelineError> {
        let mut by_name: BTreeMap<NodeName, Node> = BTreeMap::new();

        for node in nodes {
            if by_name.contains_key(&node.name) {
                return Err(PipelineError::DuplicateNode { name: node.name });
            }
            if let Some(dataset) = node.inputs.intersection(&node.outputs).next() {
                return Err(PipelineError::SelfDependency {
                    node: node.name.clone(),
                    dataset: dataset.clone(),
                });
            }
            by_name.insert(node.name.clone(), node);
        }

        let mut producers: BTreeMap<&DatasetName, &NodeName> = BTreeMap::new();
        for node in by_name.values() {
            for dataset in &node.outputs {
                if let Some(first) = producers.insert(dataset, &node.name) {
                    return Err(PipelineError::DuplicateOutput {
                        dataset: dataset.clone(),
                        first: first.clone(),
                        second: node.name.clone(),
                    });
                }
            }
        }

        Ok(Self { nodes: by_name })
    }

    /// Looks up a node by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the pipeline has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node's tag set, keyed by node name.
    pub fn node_tags(&self) -> BTreeMap<NodeName, TagSet> {
        self.nodes
            .values()
            .map(|node| (node.name.clone(), node.tags.clone()))
            .collect()
    }

    /// The child → parents relation.
    ///
    /// Every node appears as a key, with an empty set when it has no parents.
    pub fn node_dependencies(&self) -> NodeDependencies {
        let producers: BTreeMap<&DatasetName, &NodeName> = self
            .nodes
            .values()
            .flat_map(|node| node.outputs.iter().map(move |d| (d, &node.name)))
            .collect();

        self.nodes
            .values()
            .map(|node| {
                let parents = node
                    .inputs
                    .iter()
                    .filter_map(|input| producers.get(input))
                    .map(|parent| (*parent).clone())
                    .collect();
                (node.name.clone(), parents)
            })
            .collect()
    }

    /// The parent → children relation, inverted from [`Self::node_dependencies`].
    ///
    /// Only nodes with at least one child appear as keys.
    pub fn parent_to_children(&self) -> NodeDependencies {
        let mut children: NodeDependencies = BTreeMap::new();
        for (child, parents) in self.node_dependencies() {
            for parent in parents {
                children.entry(parent).or_default().insert(child.clone());
            }
        }
        children
    }

    /// Returns the union of `self` and `other`.
    ///
    /// A node present in both with an identical definition appears once; the
    /// same name with differing definitions is an error.
    pub fn merge(&self, other: &Pipeline) -> Result<Pipeline, PipelineError> {
        let mut nodes = self.nodes.clone();
        for (name, node) in &other.nodes {
            match nodes.get(name) {
                Some(existing) if existing == node => {
                    debug!(node = %name, "Node shared by merged pipelines");
                }
                Some(_) => return Err(PipelineError::ConflictingNode { name: name.clone() }),
                None => {
                    nodes.insert(name.clone(), node.clone());
                }
            }
        }
        Pipeline::new(nodes.into_values())
    }
}

impl TryFrom<Vec<Node>> for Pipeline {
    type Error = PipelineError;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        Pipeline::new(nodes)
    }
}

impl From<Pipeline> for Vec<Node> {
    fn from(pipeline: Pipeline) -> Self {
        pipeline.nodes.into_values().collect()
    }
}
