// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Error recovery suggestions
//!
//! Provides actionable suggestions for recovering from validation problems.

use crate::pipeline::ValidationMessage;

/// A recovery suggestion with concrete steps
#[derive(Debug, Clone)]
pub struct RecoverySuggestion {
    /// Brief description of what to do
    pub action: String,
    /// Detailed steps
    pub steps: Vec<String>,
    /// Commands to run
    pub commands: Vec<String>,
}

impl RecoverySuggestion {
    /// Suggest how to resolve a validation message
    pub fn for_message(message: ValidationMessage) -> Self {
        match message {
            ValidationMessage::StepIdsAreNotUnique => Self {
                action: "Give every step its own id".into(),
                steps: vec![
                    "Search the pipeline for repeated stepId values".into(),
                    "Generate a fresh UUID for each duplicate".into(),
                    "Update dependencies that pointed at the renamed step".into(),
                ],
                commands: vec!["uuidgen".into()],
            },
            ValidationMessage::UnknownComponentId => Self {
                action: "Reference a registered component".into(),
                steps: vec![
                    "Compare the step's componentId with the registry".into(),
                    "Register the component or fix the id".into(),
                ],
                commands: vec![
                    "# List registered components:".into(),
                    "stepflow components".into(),
                ],
            },
            ValidationMessage::DependencyReferencesNonExistentStep => Self {
                action: "Point dependencies at declared steps".into(),
                steps: vec![
                    "Remove dependencies on steps that were deleted".into(),
                    "Fix typos in dependency ids".into(),
                ],
                commands: vec![],
            },
            ValidationMessage::CyclicDependencyDetected => Self {
                action: "Remove circular dependency".into(),
                steps: vec![
                    "Start at the reported step and follow its dependencies".into(),
                    "Drop the dependency that leads back to the reported step".into(),
                    "Ensure steps form a directed acyclic graph (DAG)".into(),
                ],
                commands: vec![],
            },
            ValidationMessage::DanglingStep => Self {
                action: "Connect the step to the root".into(),
                steps: vec![
                    "Add a dependency on the root or on a reachable step".into(),
                    "Or delete the step if it is no longer needed".into(),
                ],
                commands: vec![
                    "# Visualize your pipeline:".into(),
                    "stepflow graph --format mermaid".into(),
                ],
            },
            ValidationMessage::RootStepMustBeUnique => Self {
                action: "Keep a single root step".into(),
                steps: vec![
                    "Pick the system-event step that should start the pipeline".into(),
                    "Remove the other system-event steps".into(),
                ],
                commands: vec![],
            },
            ValidationMessage::RootStepMustNotHaveDependencies => Self {
                action: "Clear the root step's dependencies".into(),
                steps: vec!["Set `dependencies: []` on the root step".into()],
                commands: vec![],
            },
            ValidationMessage::MissingParameters => Self {
                action: "Supply the required parameter".into(),
                steps: vec![
                    "Add the reported parameter under the step's `parameters`".into(),
                ],
                commands: vec![
                    "# Show the component's parameter schema:".into(),
                    "stepflow components --verbose".into(),
                ],
            },
            ValidationMessage::InvalidParameterValue => Self {
                action: "Fix the parameter value".into(),
                steps: vec![
                    "Check the value against the pattern declared by the component".into(),
                ],
                commands: vec![
                    "# Show the component's parameter schema:".into(),
                    "stepflow components --verbose".into(),
                ],
            },
        }
    }
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "→ {}", self.action)?;

        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }

        if !self.commands.is_empty() {
            writeln!(f)?;
            for cmd in &self.commands {
                writeln!(f, "  {}", cmd)?;
            }
        }

        Ok(())
    }
}
