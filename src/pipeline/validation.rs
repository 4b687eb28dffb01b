// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Pipeline validation
//!
//! Checks a configuration against a component registry. The checks run as a
//! fixed sequence of gates; every gate except the dangling-step scan stops
//! validation when it leaves an error in the report:
//!
//! 1. step ids are unique
//! 2. every step references a registered component
//! 3. every dependency references a declared step
//! 4. at most one root step, and it has no dependencies
//! 5. the dependency graph is acyclic
//! 6. every step is reachable from the root (warnings only)
//! 7. required parameters are present and match their patterns
//!
//! A [`Pipeline`] is built when the report holds no errors afterwards.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::errors::{StepflowError, StepflowResult};
use crate::pipeline::{
    Pipeline, PipelineConfiguration, PipelineStep, StepId, ValidationMessage, ValidationReport,
};
use crate::registry::{ComponentRegistry, RegisteredComponent};

/// Pipeline validator
pub struct PipelineValidator;

/// Report of one validation run, plus the pipeline when it is valid
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub report: ValidationReport,
    pub pipeline: Option<Pipeline>,
}

impl ValidationOutcome {
    /// True when no errors were found (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Turn a failed validation into an error the host can return
    pub fn into_pipeline(self) -> StepflowResult<Pipeline> {
        let errors = self.report.errors().count();
        let warnings = self.report.warnings().count();

        self.pipeline
            .ok_or(StepflowError::InvalidPipeline { errors, warnings })
    }
}

/// Traversal mark for cycle detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Resolved,
}

/// Work item of the iterative depth-first search
enum Visit {
    Enter(usize),
    Leave(usize),
}

struct ValidationContext<'a> {
    registry: &'a ComponentRegistry,
    steps: &'a [PipelineStep],
    report: ValidationReport,
    /// Step id -> declaration index; filled once ids are known to be unique
    index: HashMap<StepId, usize>,
    /// Declaration index -> indices of the steps depending on it
    dependents: Vec<Vec<usize>>,
    /// Resolved component of each step, in declaration order
    components: Vec<Arc<RegisteredComponent>>,
}

impl PipelineValidator {
    /// Validate a pipeline configuration
    pub fn validate(
        registry: &ComponentRegistry,
        configuration: &PipelineConfiguration,
    ) -> ValidationOutcome {
        let mut ctx = ValidationContext {
            registry,
            steps: &configuration.steps,
            report: ValidationReport::new(),
            index: HashMap::new(),
            dependents: Vec::new(),
            components: Vec::new(),
        };

        let passed = ctx.check_step_ids_are_unique()
            && ctx.check_components_are_known()
            && ctx.check_dependencies_exist()
            && ctx.check_root_step()
            && ctx.check_no_cycles();

        if passed {
            ctx.check_dangling_steps();
            ctx.check_parameters();
        }

        let ValidationContext {
            report, components, ..
        } = ctx;
        let pipeline = (!report.has_errors())
            .then(|| Pipeline::from_validated(configuration, components));

        tracing::info!(
            steps = configuration.steps.len(),
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            valid = pipeline.is_some(),
            "validated pipeline"
        );

        ValidationOutcome { report, pipeline }
    }
}

impl ValidationContext<'_> {
    fn check_step_ids_are_unique(&mut self) -> bool {
        let unique: HashSet<StepId> = self.steps.iter().map(|s| s.step_id).collect();

        if unique.len() != self.steps.len() {
            tracing::debug!(
                steps = self.steps.len(),
                unique = unique.len(),
                "step ids are not unique"
            );
            self.report
                .add_error(None, ValidationMessage::StepIdsAreNotUnique);
            return false;
        }

        self.index = self
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| (step.step_id, idx))
            .collect();

        true
    }

    fn check_components_are_known(&mut self) -> bool {
        for step in self.steps {
            match self.registry.get_component(step.component_id) {
                Some(component) => self.components.push(Arc::clone(component)),
                None => {
                    tracing::debug!(step = %step.step_id, component = %step.component_id, "unknown component");
                    self.report
                        .add_error(Some(step.step_id), ValidationMessage::UnknownComponentId);
                }
            }
        }

        !self.report.has_errors()
    }

    fn check_dependencies_exist(&mut self) -> bool {
        for step in self.steps {
            for dependency in &step.dependencies {
                if !self.index.contains_key(dependency) {
                    tracing::debug!(step = %step.step_id, dependency = %dependency, "dangling dependency reference");
                    self.report.add_error(
                        Some(step.step_id),
                        ValidationMessage::DependencyReferencesNonExistentStep,
                    );
                }
            }
        }

        if self.report.has_errors() {
            return false;
        }

        // Invert the edges so traversal follows execution order
        let mut dependents = vec![Vec::new(); self.steps.len()];
        for (idx, step) in self.steps.iter().enumerate() {
            for dependency in &step.dependencies {
                dependents[self.index[dependency]].push(idx);
            }
        }
        self.dependents = dependents;

        true
    }

    fn check_root_step(&mut self) -> bool {
        let roots: Vec<&PipelineStep> = self
            .steps
            .iter()
            .filter(|s| self.registry.is_system_event(s.component_id))
            .collect();

        if roots.len() > 1 {
            for root in &roots {
                self.report
                    .add_error(Some(root.step_id), ValidationMessage::RootStepMustBeUnique);
            }
        }

        for root in roots.iter().filter(|s| !s.dependencies.is_empty()) {
            self.report.add_error(
                Some(root.step_id),
                ValidationMessage::RootStepMustNotHaveDependencies,
            );
        }

        !self.report.has_errors()
    }

    fn check_no_cycles(&mut self) -> bool {
        match find_cycle(&self.dependents) {
            Some(idx) => {
                let step = self.steps[idx].step_id;
                tracing::debug!(step = %step, "cycle detected");
                self.report
                    .add_error(Some(step), ValidationMessage::CyclicDependencyDetected);
                false
            }
            None => true,
        }
    }

    fn check_dangling_steps(&mut self) {
        let root = self
            .steps
            .iter()
            .position(|s| self.registry.is_system_event(s.component_id));

        let mut reachable = vec![false; self.steps.len()];

        if let Some(root) = root {
            let mut queue = VecDeque::from([root]);
            reachable[root] = true;

            while let Some(current) = queue.pop_front() {
                for &next in &self.dependents[current] {
                    if !reachable[next] {
                        reachable[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        for (step, _) in self.steps.iter().zip(&reachable).filter(|(_, r)| !**r) {
            self.report
                .add_warning(Some(step.step_id), ValidationMessage::DanglingStep);
        }
    }

    fn check_parameters(&mut self) {
        for (step, component) in self.steps.iter().zip(&self.components) {
            for spec in &component.parameters {
                match step.parameters.get(&spec.name) {
                    None if spec.required => {
                        self.report.add_parameter_error(
                            step.step_id,
                            ValidationMessage::MissingParameters,
                            &spec.name,
                        );
                    }
                    Some(value) if !spec.accepts(value) => {
                        self.report.add_parameter_error(
                            step.step_id,
                            ValidationMessage::InvalidParameterValue,
                            &spec.name,
                        );
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Find a node that closes a cycle, walking every component of the graph
/// with an explicit stack.
fn find_cycle(dependents: &[Vec<usize>]) -> Option<usize> {
    let mut marks = vec![Mark::Unvisited; dependents.len()];
    let mut stack = Vec::new();

    for start in 0..dependents.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        stack.push(Visit::Enter(start));

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Leave(node) => marks[node] = Mark::Resolved,
                Visit::Enter(node) => match marks[node] {
                    Mark::Resolved => {}
                    Mark::OnPath => return Some(node),
                    Mark::Unvisited => {
                        marks[node] = Mark::OnPath;
                        stack.push(Visit::Leave(node));
                        for &next in dependents[node].iter().rev() {
                            stack.push(Visit::Enter(next));
                        }
                    }
                },
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ComponentId, ParameterSpec, RegisteredComponent};
    use regex::Regex;

    const START: &str = "start";
    const TEST: &str = "test";
    const DEPLOY: &str = "deploy";

    fn build_registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();

        registry.add_component(RegisteredComponent::system_event(ComponentId::new_v4(), START));
        registry.add_component(RegisteredComponent::new(ComponentId::new_v4(), TEST));
        registry.add_component(
            RegisteredComponent::new(ComponentId::new_v4(), DEPLOY)
                .with_parameter(ParameterSpec::required("target"))
                .with_parameter(
                    ParameterSpec::optional("region").with_pattern(Regex::new("^[a-z]+-[0-9]$").unwrap()),
                ),
        );

        registry
    }

    fn component(registry: &ComponentRegistry, name: &str) -> ComponentId {
        registry.get_component_by_name(name).unwrap().id
    }

    fn messages(outcome: &ValidationOutcome) -> Vec<ValidationMessage> {
        outcome.report.entries().iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_duplicate_step_ids() {
        let registry = build_registry();
        let test = component(&registry, TEST);
        let step_id = StepId::new_v4();

        // Later phases would also complain about the unknown component
        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(step_id, test),
            PipelineStep::new(step_id, ComponentId::new_v4()),
            PipelineStep::new(step_id, test),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert!(outcome.report.has_errors());
        assert_eq!(messages(&outcome), vec![ValidationMessage::StepIdsAreNotUnique]);
        assert_eq!(outcome.report.entries()[0].step_id, None);
    }

    #[test]
    fn test_unknown_component_per_step() {
        let registry = build_registry();
        let start = component(&registry, START);
        let a = StepId::new_v4();
        let b = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(StepId::new_v4(), start),
            PipelineStep::new(a, ComponentId::new_v4()),
            PipelineStep::new(b, ComponentId::new_v4()).with_dependency(StepId::new_v4()),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::UnknownComponentId; 2]
        );
        let steps: Vec<_> = outcome.report.entries().iter().map(|e| e.step_id).collect();
        assert_eq!(steps, vec![Some(a), Some(b)]);
    }

    #[test]
    fn test_dependency_on_missing_step() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let dependent = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(StepId::new_v4(), start),
            PipelineStep::new(dependent, test).with_dependency(StepId::new_v4()),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::DependencyReferencesNonExistentStep]
        );
        assert_eq!(outcome.report.entries()[0].step_id, Some(dependent));
    }

    #[test]
    fn test_one_entry_per_missing_dependency() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let root = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(StepId::new_v4(), test)
                .with_dependency(StepId::new_v4())
                .with_dependency(root)
                .with_dependency(StepId::new_v4()),
            PipelineStep::new(StepId::new_v4(), test).with_dependency(StepId::new_v4()),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::DependencyReferencesNonExistentStep; 3]
        );
    }

    #[test]
    fn test_multiple_root_steps() {
        let registry = build_registry();
        let start = component(&registry, START);
        let first = StepId::new_v4();
        let second = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(first, start),
            PipelineStep::new(second, start),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::RootStepMustBeUnique; 2]
        );
        let steps: Vec<_> = outcome.report.entries().iter().map(|e| e.step_id).collect();
        assert_eq!(steps, vec![Some(first), Some(second)]);
    }

    #[test]
    fn test_root_step_with_dependency() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let root = StepId::new_v4();
        let dependency = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start).with_dependency(dependency),
            PipelineStep::new(dependency, test),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::RootStepMustNotHaveDependencies]
        );
        assert_eq!(outcome.report.entries()[0].step_id, Some(root));
    }

    #[test]
    fn test_duplicate_roots_with_dependencies() {
        let registry = build_registry();
        let start = component(&registry, START);
        let first = StepId::new_v4();
        let second = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(first, start),
            PipelineStep::new(second, start).with_dependency(first),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert_eq!(
            messages(&outcome),
            vec![
                ValidationMessage::RootStepMustBeUnique,
                ValidationMessage::RootStepMustBeUnique,
                ValidationMessage::RootStepMustNotHaveDependencies,
            ]
        );
        assert_eq!(outcome.report.entries()[2].step_id, Some(second));
    }

    #[test]
    fn test_three_step_cycle() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let (a, b, c) = (StepId::new_v4(), StepId::new_v4(), StepId::new_v4());

        // a -> c -> b -> a
        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(StepId::new_v4(), start),
            PipelineStep::new(a, test).with_dependency(c),
            PipelineStep::new(b, test).with_dependency(a),
            PipelineStep::new(c, test).with_dependency(b),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::CyclicDependencyDetected]
        );
        // Traversal starts at `a`, walks a -> b -> c and finds `a` on the path
        assert_eq!(outcome.report.entries()[0].step_id, Some(a));
    }

    #[test]
    fn test_disjoint_cycles_report_once() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let (a, b, c, d) = (StepId::new_v4(), StepId::new_v4(), StepId::new_v4(), StepId::new_v4());

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(StepId::new_v4(), start),
            PipelineStep::new(a, test).with_dependency(b),
            PipelineStep::new(b, test).with_dependency(a),
            PipelineStep::new(c, test).with_dependency(d),
            PipelineStep::new(d, test).with_dependency(c),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::CyclicDependencyDetected]
        );
        let step = outcome.report.entries()[0].step_id;
        assert!(step == Some(a) || step == Some(b), "{step:?}");
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let root = StepId::new_v4();
        let looped = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(looped, test)
                .with_dependency(root)
                .with_dependency(looped),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::CyclicDependencyDetected]
        );
        assert_eq!(outcome.report.entries()[0].step_id, Some(looped));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let (root, left, right, join) = (
            StepId::new_v4(),
            StepId::new_v4(),
            StepId::new_v4(),
            StepId::new_v4(),
        );

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(join, test)
                .with_dependency(left)
                .with_dependency(right)
                .with_dependency(left),
            PipelineStep::new(right, test).with_dependency(root),
            PipelineStep::new(left, test).with_dependency(root),
            PipelineStep::new(root, start),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.report.is_empty(), "{:?}", outcome.report);
        assert!(outcome.pipeline.is_some());
    }

    #[test]
    fn test_dangling_steps_warn_and_still_build() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let root = StepId::new_v4();
        let connected = StepId::new_v4();
        let dangling = StepId::new_v4();
        let another_dangling = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(connected, test).with_dependency(root),
            PipelineStep::new(dangling, test),
            PipelineStep::new(another_dangling, test).with_dependency(dangling),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.report.has_warnings());
        assert!(!outcome.report.has_errors());
        assert_eq!(messages(&outcome), vec![ValidationMessage::DanglingStep; 2]);
        let steps: Vec<_> = outcome.report.entries().iter().map(|e| e.step_id).collect();
        assert_eq!(steps, vec![Some(dangling), Some(another_dangling)]);

        let pipeline = outcome.pipeline.expect("warnings do not block the pipeline");
        assert_eq!(pipeline.root(), Some(root));
        assert_eq!(pipeline.len(), 4);
    }

    #[test]
    fn test_no_root_marks_every_step_dangling() {
        let registry = build_registry();
        let test = component(&registry, TEST);
        let a = StepId::new_v4();
        let b = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(a, test),
            PipelineStep::new(b, test).with_dependency(a),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert_eq!(messages(&outcome), vec![ValidationMessage::DanglingStep; 2]);
        assert!(!outcome.report.has_errors());
        let pipeline = outcome.pipeline.unwrap();
        assert_eq!(pipeline.root(), None);
    }

    #[test]
    fn test_empty_configuration() {
        let registry = build_registry();
        let outcome = PipelineValidator::validate(&registry, &PipelineConfiguration::default());

        assert!(outcome.report.is_empty());
        assert!(outcome.pipeline.unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_parameter() {
        let registry = build_registry();
        let start = component(&registry, START);
        let deploy = component(&registry, DEPLOY);
        let root = StepId::new_v4();
        let step = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(step, deploy)
                .with_dependency(root)
                .with_parameter("region", "eu-1"),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(messages(&outcome), vec![ValidationMessage::MissingParameters]);
        let entry = &outcome.report.entries()[0];
        assert_eq!(entry.step_id, Some(step));
        assert_eq!(entry.parameter.as_deref(), Some("target"));
        assert!(entry.is_error);
    }

    #[test]
    fn test_one_entry_per_missing_parameter() {
        let mut registry = build_registry();
        let release = ComponentId::new_v4();
        registry.add_component(
            RegisteredComponent::new(release, "release")
                .with_parameter(ParameterSpec::required("a"))
                .with_parameter(ParameterSpec::required("b")),
        );
        let start = component(&registry, START);
        let root = StepId::new_v4();
        let step = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(step, release).with_dependency(root),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        let found: Vec<_> = outcome
            .report
            .entries()
            .iter()
            .map(|e| (e.message, e.step_id, e.parameter.as_deref()))
            .collect();
        assert_eq!(
            found,
            vec![
                (ValidationMessage::MissingParameters, Some(step), Some("a")),
                (ValidationMessage::MissingParameters, Some(step), Some("b")),
            ]
        );
    }

    #[test]
    fn test_extra_parameters_are_accepted() {
        let registry = build_registry();
        let start = component(&registry, START);
        let deploy = component(&registry, DEPLOY);
        let root = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(StepId::new_v4(), deploy)
                .with_dependency(root)
                .with_parameter("target", "prod")
                .with_parameter("undeclared", "ignored"),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.report.is_empty(), "{:?}", outcome.report);
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_parameter_pattern_mismatch() {
        let registry = build_registry();
        let start = component(&registry, START);
        let deploy = component(&registry, DEPLOY);
        let root = StepId::new_v4();

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(root, start),
            PipelineStep::new(StepId::new_v4(), deploy)
                .with_dependency(root)
                .with_parameter("target", "prod")
                .with_parameter("region", "Mars"),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.pipeline.is_none());
        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::InvalidParameterValue]
        );
        assert_eq!(outcome.report.entries()[0].parameter.as_deref(), Some("region"));
    }

    #[test]
    fn test_dangling_warning_and_parameter_error_together() {
        let registry = build_registry();
        let start = component(&registry, START);
        let deploy = component(&registry, DEPLOY);

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(StepId::new_v4(), start),
            PipelineStep::new(StepId::new_v4(), deploy),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert_eq!(
            messages(&outcome),
            vec![ValidationMessage::DanglingStep, ValidationMessage::MissingParameters]
        );
        assert!(outcome.pipeline.is_none());
        assert!(matches!(
            outcome.into_pipeline(),
            Err(StepflowError::InvalidPipeline { errors: 1, warnings: 1 })
        ));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let orphans: Vec<StepId> = (0..16).map(|_| StepId::new_v4()).collect();

        let mut steps = vec![PipelineStep::new(StepId::new_v4(), start)];
        steps.extend(orphans.iter().map(|id| PipelineStep::new(*id, test)));
        let config = PipelineConfiguration::new(steps);

        let first = PipelineValidator::validate(&registry, &config);
        let second = PipelineValidator::validate(&registry, &config);

        assert_eq!(first.report, second.report);
        let reported: Vec<_> = first.report.entries().iter().filter_map(|e| e.step_id).collect();
        assert_eq!(reported, orphans);
    }

    #[test]
    fn test_valid_pipeline_round_trip() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);
        let (a, b, c) = (StepId::new_v4(), StepId::new_v4(), StepId::new_v4());

        let config = PipelineConfiguration::new(vec![
            PipelineStep::new(a, start),
            PipelineStep::new(b, test).with_dependency(a),
            PipelineStep::new(c, test).with_dependency(b),
        ]);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(!outcome.report.has_errors());
        assert!(!outcome.report.has_warnings());
        assert!(outcome.report.is_empty());

        let pipeline = outcome.into_pipeline().unwrap();
        let mut reachable = pipeline.reachable_from_root();
        reachable.sort();
        let mut expected = vec![a, b, c];
        expected.sort();
        assert_eq!(reachable, expected);
        assert_eq!(pipeline.into_configuration(), config);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let registry = build_registry();
        let start = component(&registry, START);
        let test = component(&registry, TEST);

        let ids: Vec<StepId> = (0..100_000).map(|_| StepId::new_v4()).collect();
        let mut steps = vec![PipelineStep::new(ids[0], start)];
        for pair in ids.windows(2) {
            steps.push(PipelineStep::new(pair[1], test).with_dependency(pair[0]));
        }
        let config = PipelineConfiguration::new(steps);

        let outcome = PipelineValidator::validate(&registry, &config);

        assert!(outcome.report.is_empty());
        assert_eq!(outcome.pipeline.unwrap().len(), ids.len());
    }

    #[test]
    fn test_find_cycle_reports_back_edge_target() {
        // 0 -> 1 -> 2 -> 1
        let dependents = vec![vec![1], vec![2], vec![1]];
        assert_eq!(find_cycle(&dependents), Some(1));

        // 0 -> 1, 0 -> 2, 1 -> 2
        let dependents = vec![vec![1, 2], vec![2], vec![]];
        assert_eq!(find_cycle(&dependents), None);
    }
}
