//! Shared fixtures for the grouping integration tests.

#![allow(dead_code)]

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use pipeline::{DatasetName, GroupId, Node, NodeName, Pipeline, PipelineName, Tag};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub fn group(id: &str) -> GroupId {
    GroupId::new(id).unwrap()
}

pub fn name(id: &str) -> NodeName {
    NodeName::new(id).unwrap()
}

pub fn pipeline_name(id: &str) -> PipelineName {
    PipelineName::new(id).unwrap()
}

/// Builds a node from string slices.
pub fn node(id: &str, tags: &[&str], inputs: &[&str], outputs: &[&str]) -> Node {
    let mut node = Node::new(name(id));
    for tag in tags {
        node = node.with_tag(Tag::new(*tag).unwrap());
    }
    for input in inputs {
        node = node.with_input(DatasetName::new(*input).unwrap());
    }
    for output in outputs {
        node = node.with_output(DatasetName::new(*output).unwrap());
    }
    node
}

/// The three-node split → train → evaluate pipeline, tagged per node.
pub fn spaceflights(split_tags: &[&str], train_tags: &[&str], eval_tags: &[&str]) -> Pipeline {
    Pipeline::new([
        node(
            "split_data_node",
            split_tags,
            &["model_input_table", "params:model_options"],
            &["X_train", "X_test", "y_train", "y_test"],
        ),
        node("train_model_node", train_tags, &["X_train", "y_train"], &["regressor"]),
        node(
            "evaluate_model_node",
            eval_tags,
            &["regressor", "X_test", "y_test"],
            &[],
        ),
    ])
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════
// LOG CAPTURE
// ═══════════════════════════════════════════════════════════════

struct Capture {
    level: Level,
    lines: Arc<Mutex<Vec<String>>>,
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == self.level {
            let mut line = String::new();
            event.record(&mut FieldWriter(&mut line));
            self.lines.lock().unwrap().push(line);
        }
    }
}

struct FieldWriter<'a>(&'a mut String);

impl Visit for FieldWriter<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

/// Runs `f` with a thread-local subscriber and returns its result together
/// with the rendered fields of every event logged at exactly `level`.
pub fn capture_events<R>(level: Level, f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        level,
        lines: Arc::clone(&lines),
    });

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = lines.lock().unwrap().clone();
    (result, captured)
}
