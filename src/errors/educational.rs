// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Educational error messages
//!
//! Longer explanations for each validation message, shown by
//! `stepflow explain` and `stepflow validate --explain`.

use crate::pipeline::ValidationMessage;

/// Educational message with explanation and examples
#[derive(Debug, Clone)]
pub struct EducationalMessage {
    /// Short summary of the issue
    pub summary: String,
    /// Detailed explanation
    pub explanation: String,
    /// Example of correct usage
    pub example: Option<String>,
}

impl EducationalMessage {
    /// Explain a validation message
    pub fn for_message(message: ValidationMessage) -> Self {
        match message {
            ValidationMessage::StepIdsAreNotUnique => Self {
                summary: "Step ids are not unique".into(),
                explanation: "Every step is addressed by its stepId: dependencies point at it and\n\
                              problems are reported against it. Two steps sharing an id make both\n\
                              ambiguous, so validation stops before any other check runs."
                    .into(),
                example: Some(
                    "steps:\n  \
                       - stepId: 1b4e28ba-2fa1-11d2-883f-0016d3cca427\n    \
                         componentId: ...\n  \
                       - stepId: 6ecd8c99-4036-403d-bf84-cf8400f67836  # not the same id\n    \
                         componentId: ..."
                        .into(),
                ),
            },
            ValidationMessage::UnknownComponentId => Self {
                summary: "Step references an unknown component".into(),
                explanation: "The componentId of a step must name a component in the registry.\n\
                              Dependency and cycle checks are skipped until every reference\n\
                              resolves."
                    .into(),
                example: Some("# List the registered components:\nstepflow components".into()),
            },
            ValidationMessage::DependencyReferencesNonExistentStep => Self {
                summary: "Dependency references a non-existent step".into(),
                explanation: "Each entry in `dependencies` must be the stepId of another step in\n\
                              the same pipeline. One problem is reported per unresolved entry."
                    .into(),
                example: Some(
                    "- stepId: 6ecd8c99-4036-403d-bf84-cf8400f67836\n  \
                       dependencies:\n    \
                         - 1b4e28ba-2fa1-11d2-883f-0016d3cca427  # must be declared above or below"
                        .into(),
                ),
            },
            ValidationMessage::CyclicDependencyDetected => Self {
                summary: "Cyclic dependency detected".into(),
                explanation: "Dependencies must form a directed acyclic graph: following them\n\
                              forward from any step must never lead back to it. The reported\n\
                              step is where the cycle closes; only the first cycle is reported."
                    .into(),
                example: Some(
                    "# Invalid: a depends on c, c on b, b on a\n\
                     # Valid:   b depends on a, c depends on b"
                        .into(),
                ),
            },
            ValidationMessage::DanglingStep => Self {
                summary: "Step is not reachable from the root step".into(),
                explanation: "Execution starts at the root step and follows dependencies forward.\n\
                              A step that cannot be reached that way would never run. This is a\n\
                              warning: the pipeline is still accepted."
                    .into(),
                example: Some(
                    "# Connect the step to something reachable:\n\
                     dependencies:\n  \
                       - <stepId of the root or of a reachable step>"
                        .into(),
                ),
            },
            ValidationMessage::RootStepMustBeUnique => Self {
                summary: "More than one root step".into(),
                explanation: "Steps using a system-event component are pipeline entry points.\n\
                              A pipeline has exactly one; every such step is reported."
                    .into(),
                example: None,
            },
            ValidationMessage::RootStepMustNotHaveDependencies => Self {
                summary: "Root step declares dependencies".into(),
                explanation: "The root step is where execution begins, so nothing can run\n\
                              before it. Remove its `dependencies`."
                    .into(),
                example: Some(
                    "- stepId: 1b4e28ba-2fa1-11d2-883f-0016d3cca427\n  \
                       componentId: <system event>\n  \
                       dependencies: []"
                        .into(),
                ),
            },
            ValidationMessage::MissingParameters => Self {
                summary: "Required parameter is missing".into(),
                explanation: "The step's component declares this parameter as required. Values\n\
                              are plain strings; keys the component does not declare are\n\
                              accepted and ignored."
                    .into(),
                example: Some("parameters:\n  url: https://example.com/repo.git".into()),
            },
            ValidationMessage::InvalidParameterValue => Self {
                summary: "Parameter value does not match its pattern".into(),
                explanation: "The component attaches a regular expression to this parameter and\n\
                              the supplied value does not match it anywhere. Patterns are\n\
                              searched, not anchored, unless they use ^ and $."
                    .into(),
                example: None,
            },
        }
    }
}

impl std::fmt::Display for EducationalMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "{}", self.explanation)?;

        if let Some(ref example) = self.example {
            writeln!(f)?;
            writeln!(f, "Example:")?;
            writeln!(f, "────────")?;
            writeln!(f, "{}", example)?;
        }

        Ok(())
    }
}
