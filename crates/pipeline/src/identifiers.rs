//! Newtype domain identifiers.
//!
//! Node names, tags, group ids and dataset names are all strings under the
//! hood, but they are not interchangeable: a [`Tag`] only becomes a
//! [`GroupId`] when it carries the grouping prefix, and a [`NodeName`] only
//! becomes a [`GroupId`] when the node is ungrouped. Keeping them distinct
//! makes every such conversion explicit.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PipelineError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display,
// Borrow<str>, and a serde representation that rejects empty strings.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = PipelineError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or_else(|| PipelineError::EmptyIdentifier {
                    kind: stringify!($name).to_string(),
                })
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single validation run (one call to the grouping validator).
///
/// Generated fresh for every run; recorded on the validation span and in the
/// report so log lines and reports from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationRunId(Uuid);

impl ValidationRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ValidationRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a task node by its unique name within a pipeline.
    NodeName
}

string_id! {
    /// Identifies a named pipeline (e.g. `"data_processing"`, `"__default__"`).
    PipelineName
}

string_id! {
    /// Names a dataset that nodes consume as input or produce as output.
    ///
    /// Node dependencies are derived from datasets: a node depends on
    /// whichever node produces one of its inputs.
    DatasetName
}

string_id! {
    /// An opaque tag attached to a node.
    ///
    /// Two prefixes carry meaning: the grouping prefix (default `"airflow:"`)
    /// assigns the node to an export group, and the machine prefix (default
    /// `"machine:"`) states a resource affinity. All other tags are opaque.
    Tag
}

string_id! {
    /// Identifies a group in the collapsed dependency graph.
    ///
    /// A grouped node's group id is its grouping tag verbatim (prefix
    /// included). An ungrouped node forms a singleton group whose id is the
    /// node's own name.
    GroupId
}

/// Name of the pipeline combining every registered pipeline.
pub const DEFAULT_PIPELINE: &str = "__default__";

impl PipelineName {
    /// The `"__default__"` pipeline name.
    pub fn default_pipeline() -> Self {
        Self(DEFAULT_PIPELINE.to_string())
    }
}

impl Tag {
    /// Returns `true` if this tag starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl GroupId {
    /// Returns an id derived from `seed` that `is_taken` does not reject.
    ///
    /// The seed is wrapped in one more pair of underscores on every collision,
    /// so `"__start__"` becomes `"___start___"`, then `"____start____"`.
    pub fn unused(seed: &str, is_taken: impl Fn(&str) -> bool) -> Self {
        let mut candidate = seed.to_string();
        while candidate.is_empty() || is_taken(&candidate) {
            candidate = format!("_{candidate}_");
        }
        Self(candidate)
    }
}

impl From<NodeName> for GroupId {
    fn from(node: NodeName) -> Self {
        Self(node.0)
    }
}

impl From<&NodeName> for GroupId {
    fn from(node: &NodeName) -> Self {
        Self(node.0.clone())
    }
}

impl From<&Tag> for GroupId {
    fn from(tag: &Tag) -> Self {
        Self(tag.0.clone())
    }
}
