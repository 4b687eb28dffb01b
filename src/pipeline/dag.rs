// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Validated pipeline graph
//!
//! A [`Pipeline`] only exists for configurations that passed validation. It
//! keeps the input steps untouched, pairs each with its resolved component,
//! and holds the dependency graph with edges pointing in execution order
//! (dependency -> dependent).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::Direction;

use crate::errors::{StepflowError, StepflowResult};
use crate::pipeline::{PipelineConfiguration, PipelineStep, StepId};
use crate::registry::RegisteredComponent;

/// A step paired with the component it resolved to
#[derive(Debug, Clone)]
pub struct PipelineNode {
    pub step: PipelineStep,
    pub component: Arc<RegisteredComponent>,
}

/// A structurally valid pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: Option<String>,
    nodes: Vec<PipelineNode>,
    graph: DiGraph<usize, ()>,
    step_to_index: HashMap<StepId, NodeIndex>,
    root: Option<NodeIndex>,
}

impl Pipeline {
    /// Materialize the graph of a configuration the validator accepted.
    ///
    /// `components` holds the resolved component of each step, in
    /// declaration order. Callers must have established that step ids are
    /// unique, every dependency resolves, there is at most one root and the
    /// graph is acyclic.
    pub(crate) fn from_validated(
        configuration: &PipelineConfiguration,
        components: Vec<Arc<RegisteredComponent>>,
    ) -> Self {
        let mut graph = DiGraph::with_capacity(configuration.steps.len(), 0);
        let mut step_to_index = HashMap::with_capacity(configuration.steps.len());
        let mut nodes = Vec::with_capacity(configuration.steps.len());
        let mut root = None;

        for (idx, (step, component)) in configuration.steps.iter().zip(components).enumerate() {
            let node = graph.add_node(idx);
            step_to_index.insert(step.step_id, node);

            if component.is_system_event {
                root = Some(node);
            }

            nodes.push(PipelineNode {
                step: step.clone(),
                component,
            });
        }

        for step in &configuration.steps {
            let step_node = step_to_index[&step.step_id];

            for dependency in &step.dependencies {
                let Some(&dep_node) = step_to_index.get(dependency) else {
                    continue;
                };

                // Repeated dependencies collapse into one edge
                if !graph.contains_edge(dep_node, step_node) {
                    graph.add_edge(dep_node, step_node, ());
                }
            }
        }

        Self {
            name: configuration.name.clone(),
            nodes,
            graph,
            step_to_index,
            root,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Steps with their components, in declaration order
    pub fn nodes(&self) -> &[PipelineNode] {
        &self.nodes
    }

    /// Steps in declaration order
    pub fn steps(&self) -> impl Iterator<Item = &PipelineStep> {
        self.nodes.iter().map(|n| &n.step)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn step(&self, step_id: StepId) -> Option<&PipelineStep> {
        self.node(step_id).map(|n| &n.step)
    }

    /// The component a step resolved to
    pub fn component(&self, step_id: StepId) -> Option<&Arc<RegisteredComponent>> {
        self.node(step_id).map(|n| &n.component)
    }

    /// The root step, when the pipeline has one
    pub fn root(&self) -> Option<StepId> {
        self.root.map(|n| self.step_id_at(n))
    }

    /// Steps that must run before this one (declaration order, deduplicated)
    pub fn dependencies(&self, step_id: StepId) -> Option<Vec<StepId>> {
        self.neighbors(step_id, Direction::Incoming)
    }

    /// Steps that wait on this one (deduplicated)
    pub fn dependents(&self, step_id: StepId) -> Option<Vec<StepId>> {
        self.neighbors(step_id, Direction::Outgoing)
    }

    /// Steps reachable from the root by following edges forward
    pub fn reachable_from_root(&self) -> Vec<StepId> {
        let Some(root) = self.root else {
            return Vec::new();
        };

        let mut reachable = Vec::new();
        let mut bfs = Bfs::new(&self.graph, root);
        while let Some(node) = bfs.next(&self.graph) {
            reachable.push(self.step_id_at(node));
        }
        reachable
    }

    /// Check if `step` depends (directly or transitively) on `on`
    pub fn depends_on(&self, step: StepId, on: StepId) -> bool {
        let (Some(&step_node), Some(&on_node)) =
            (self.step_to_index.get(&step), self.step_to_index.get(&on))
        else {
            return false;
        };

        step_node != on_node
            && petgraph::algo::has_path_connecting(&self.graph, on_node, step_node, None)
    }

    /// Steps in an order that respects every dependency
    pub fn execution_order(&self) -> StepflowResult<Vec<&PipelineStep>> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|n| &self.nodes[self.graph[n]].step).collect())
            .map_err(|cycle| StepflowError::CircularDependency {
                step: self.step_id_at(cycle.node_id()).to_string(),
            })
    }

    /// Hand back the configuration this pipeline was built from
    pub fn into_configuration(self) -> PipelineConfiguration {
        PipelineConfiguration {
            name: self.name,
            steps: self.nodes.into_iter().map(|n| n.step).collect(),
        }
    }

    /// Generate text representation of execution order
    pub fn to_text(&self) -> StepflowResult<String> {
        let order = self.execution_order()?;
        let reachable: HashSet<StepId> = self.reachable_from_root().into_iter().collect();
        let mut out = String::new();

        for (i, step) in order.iter().enumerate() {
            let node = &self.nodes[self.graph[self.step_to_index[&step.step_id]]];
            out.push_str(&format!("{}. {} ({})", i + 1, step.step_id, node.component.name));

            if Some(step.step_id) == self.root() {
                out.push_str(" [root]");
            } else if !reachable.contains(&step.step_id) {
                out.push_str(" [dangling]");
            }

            let deps = self.dependencies(step.step_id).unwrap_or_default();
            if !deps.is_empty() {
                let deps: Vec<String> = deps.iter().map(ToString::to_string).collect();
                out.push_str(&format!(" [depends: {}]", deps.join(", ")));
            }

            out.push('\n');
        }

        Ok(out)
    }

    /// Generate DOT diagram of the graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n");

        for node in &self.nodes {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\"];\n",
                node.step.step_id,
                escape_dot(&node.component.name)
            ));
        }

        for edge in self.graph.raw_edges() {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\";\n",
                self.step_id_at(edge.source()),
                self.step_id_at(edge.target())
            ));
        }

        out.push_str("}\n");
        out
    }

    /// Generate Mermaid diagram of the graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        // Mermaid ids cannot contain '-', so nodes are keyed by position
        for (idx, node) in self.nodes.iter().enumerate() {
            out.push_str(&format!(
                "    s{}[\"{}\"]\n",
                idx,
                escape_mermaid(&node.component.name)
            ));
        }

        for edge in self.graph.raw_edges() {
            out.push_str(&format!(
                "    s{} --> s{}\n",
                self.graph[edge.source()],
                self.graph[edge.target()]
            ));
        }

        out
    }

    fn node(&self, step_id: StepId) -> Option<&PipelineNode> {
        let index = self.step_to_index.get(&step_id)?;
        Some(&self.nodes[self.graph[*index]])
    }

    fn step_id_at(&self, node: NodeIndex) -> StepId {
        self.nodes[self.graph[node]].step.step_id
    }

    fn neighbors(&self, step_id: StepId, direction: Direction) -> Option<Vec<StepId>> {
        let node = self.step_to_index.get(&step_id)?;
        let mut found: Vec<NodeIndex> = self.graph.neighbors_directed(*node, direction).collect();
        // petgraph yields neighbors newest-edge first
        found.sort_by_key(|n| self.graph[*n]);
        Some(found.into_iter().map(|n| self.step_id_at(n)).collect())
    }
}

/// Escape a DOT quoted string
fn escape_dot(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a Mermaid quoted label
fn escape_mermaid(label: &str) -> String {
    label.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineValidator;
    use crate::registry::{ComponentId, ComponentRegistry};
    use uuid::Uuid;

    fn id(n: u128) -> StepId {
        StepId(Uuid::from_u128(n))
    }

    fn build(registry: &ComponentRegistry, config: &PipelineConfiguration) -> Pipeline {
        PipelineValidator::validate(registry, config)
            .pipeline
            .expect("configuration should validate")
    }

    fn registry() -> (ComponentRegistry, ComponentId, ComponentId) {
        let start = ComponentId(Uuid::from_u128(0x100));
        let task = ComponentId(Uuid::from_u128(0x200));
        let mut registry = ComponentRegistry::new();
        registry.add_component(RegisteredComponent::system_event(start, "start"));
        registry.add_component(RegisteredComponent::new(task, "task"));
        (registry, start, task)
    }

    /// root(1) -> 2 -> 4, root(1) -> 3 -> 4
    fn diamond() -> Pipeline {
        let (registry, start, task) = registry();
        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(id(1), start),
            PipelineStep::new(id(2), task).with_dependency(id(1)),
            PipelineStep::new(id(3), task).with_dependency(id(1)),
            PipelineStep::new(id(4), task)
                .with_dependency(id(2))
                .with_dependency(id(3))
                .with_dependency(id(2)),
        ]);
        build(&registry, &config)
    }

    #[test]
    fn test_root_and_neighbors() {
        let pipeline = diamond();

        assert_eq!(pipeline.root(), Some(id(1)));
        assert_eq!(pipeline.dependents(id(1)).unwrap(), vec![id(2), id(3)]);
        assert_eq!(pipeline.dependencies(id(4)).unwrap(), vec![id(2), id(3)]);
        assert!(pipeline.dependencies(id(99)).is_none());
        assert_eq!(pipeline.component(id(2)).unwrap().name, "task");
    }

    #[test]
    fn test_execution_order() {
        let pipeline = diamond();
        let order: Vec<StepId> = pipeline
            .execution_order()
            .unwrap()
            .into_iter()
            .map(|s| s.step_id)
            .collect();

        assert_eq!(order.len(), 4);
        assert_eq!(order[0], id(1));
        assert_eq!(order[3], id(4));
    }

    #[test]
    fn test_depends_on_check() {
        let pipeline = diamond();

        assert!(pipeline.depends_on(id(4), id(1))); // transitive
        assert!(pipeline.depends_on(id(2), id(1))); // direct
        assert!(!pipeline.depends_on(id(1), id(4))); // reverse
        assert!(!pipeline.depends_on(id(2), id(3))); // siblings
        assert!(!pipeline.depends_on(id(2), id(2)));
    }

    #[test]
    fn test_reachable_from_root() {
        let pipeline = diamond();
        let mut reachable = pipeline.reachable_from_root();
        reachable.sort();
        assert_eq!(reachable, vec![id(1), id(2), id(3), id(4)]);
    }

    #[test]
    fn test_into_configuration_is_lossless() {
        let (registry, start, task) = registry();
        let config = PipelineConfiguration {
            name: Some("build".into()),
            steps: vec![
                PipelineStep::new(id(1), start),
                PipelineStep::new(id(2), task)
                    .with_dependency(id(1))
                    .with_parameter("extra", "kept"),
            ],
        };

        let pipeline = build(&registry, &config);
        assert_eq!(pipeline.name(), Some("build"));
        assert_eq!(pipeline.into_configuration(), config);
    }

    #[test]
    fn test_dot_output() {
        let (registry, start, task) = registry();
        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(id(1), start),
            PipelineStep::new(id(2), task).with_dependency(id(1)),
        ]);
        let pipeline = build(&registry, &config);

        insta::assert_snapshot!(pipeline.to_dot(), @r#"
        digraph pipeline {
            rankdir=TB;
            node [shape=box, style=rounded];
            "00000000-0000-0000-0000-000000000001" [label="start"];
            "00000000-0000-0000-0000-000000000002" [label="task"];
            "00000000-0000-0000-0000-000000000001" -> "00000000-0000-0000-0000-000000000002";
        }
        "#);
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut registry = ComponentRegistry::new();
        let greet = ComponentId(Uuid::from_u128(0x300));
        registry.add_component(RegisteredComponent::system_event(greet, r#"say "hi" \ bye"#));
        let config = PipelineConfiguration::new(vec![PipelineStep::new(id(1), greet)]);
        let pipeline = build(&registry, &config);

        assert!(pipeline
            .to_dot()
            .contains(r#"[label="say \"hi\" \\ bye"];"#));
        assert!(pipeline
            .to_mermaid()
            .contains(r#"s0["say #quot;hi#quot; \ bye"]"#));
    }

    #[test]
    fn test_mermaid_output() {
        let mermaid = diamond().to_mermaid();

        assert!(mermaid.starts_with("graph TD\n"));
        assert!(mermaid.contains("s0[\"start\"]"));
        assert!(mermaid.contains("s0 --> s1"));
        assert!(mermaid.contains("s2 --> s3"));
    }

    #[test]
    fn test_text_marks_root_and_dangling() {
        let (registry, start, task) = registry();
        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(id(1), start),
            PipelineStep::new(id(2), task).with_dependency(id(1)),
            PipelineStep::new(id(3), task),
        ]);
        let pipeline = build(&registry, &config);
        let text = pipeline.to_text().unwrap();

        assert!(text.contains("00000000-0000-0000-0000-000000000001 (start) [root]"));
        assert!(text.contains("00000000-0000-0000-0000-000000000003 (task) [dangling]"));
        assert!(text.contains("[depends: 00000000-0000-0000-0000-000000000001]"));
    }
}
