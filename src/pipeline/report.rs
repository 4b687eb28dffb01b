// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Validation report
//!
//! Ordered, append-only list of the problems one validation run found.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StepflowError;
use crate::pipeline::StepId;

/// Kind of problem found in a pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationMessage {
    StepIdsAreNotUnique,
    UnknownComponentId,
    DependencyReferencesNonExistentStep,
    CyclicDependencyDetected,
    DanglingStep,
    RootStepMustBeUnique,
    RootStepMustNotHaveDependencies,
    MissingParameters,
    InvalidParameterValue,
}

impl ValidationMessage {
    pub const ALL: [ValidationMessage; 9] = [
        Self::StepIdsAreNotUnique,
        Self::UnknownComponentId,
        Self::DependencyReferencesNonExistentStep,
        Self::CyclicDependencyDetected,
        Self::DanglingStep,
        Self::RootStepMustBeUnique,
        Self::RootStepMustNotHaveDependencies,
        Self::MissingParameters,
        Self::InvalidParameterValue,
    ];

    /// Wire code of the message
    pub fn code(self) -> &'static str {
        match self {
            Self::StepIdsAreNotUnique => "StepIdsAreNotUnique",
            Self::UnknownComponentId => "UnknownComponentId",
            Self::DependencyReferencesNonExistentStep => "DependencyReferencesNonExistentStep",
            Self::CyclicDependencyDetected => "CyclicDependencyDetected",
            Self::DanglingStep => "DanglingStep",
            Self::RootStepMustBeUnique => "RootStepMustBeUnique",
            Self::RootStepMustNotHaveDependencies => "RootStepMustNotHaveDependencies",
            Self::MissingParameters => "MissingParameters",
            Self::InvalidParameterValue => "InvalidParameterValue",
        }
    }

    /// One-line human description
    pub fn describe(self) -> &'static str {
        match self {
            Self::StepIdsAreNotUnique => "step ids are not unique",
            Self::UnknownComponentId => "step references an unknown component",
            Self::DependencyReferencesNonExistentStep => "dependency references a non-existent step",
            Self::CyclicDependencyDetected => "cyclic dependency detected",
            Self::DanglingStep => "step is not reachable from the root step",
            Self::RootStepMustBeUnique => "more than one root step",
            Self::RootStepMustNotHaveDependencies => "root step declares dependencies",
            Self::MissingParameters => "required parameter is missing",
            Self::InvalidParameterValue => "parameter value does not match its pattern",
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ValidationMessage {
    type Err = StepflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| StepflowError::UnknownMessageCode {
                code: s.to_string(),
                known: Self::ALL.map(Self::code).join(", "),
            })
    }
}

/// A single report entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationEntry {
    /// Offending step; `None` for configuration-wide problems
    pub step_id: Option<StepId>,

    pub message: ValidationMessage,

    pub is_error: bool,

    /// Offending parameter, for parameter messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl fmt::Display for ValidationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step_id {
            Some(step) => write!(f, "step {}: {}", step, self.message.describe())?,
            None => write!(f, "{}", self.message.describe())?,
        }
        if let Some(parameter) = &self.parameter {
            write!(f, " ('{}')", parameter)?;
        }
        write!(f, " [{}]", self.message)
    }
}

/// Entries produced by one validation run, in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    entries: Vec<ValidationEntry>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, step_id: Option<StepId>, message: ValidationMessage) {
        self.push(step_id, message, true, None);
    }

    pub fn add_warning(&mut self, step_id: Option<StepId>, message: ValidationMessage) {
        self.push(step_id, message, false, None);
    }

    /// Record an error about one parameter of a step
    pub fn add_parameter_error(
        &mut self,
        step_id: StepId,
        message: ValidationMessage,
        parameter: impl Into<String>,
    ) {
        self.push(Some(step_id), message, true, Some(parameter.into()));
    }

    fn push(
        &mut self,
        step_id: Option<StepId>,
        message: ValidationMessage,
        is_error: bool,
        parameter: Option<String>,
    ) {
        self.entries.push(ValidationEntry {
            step_id,
            message,
            is_error,
            parameter,
        });
    }

    pub fn entries(&self) -> &[ValidationEntry] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationEntry> {
        self.entries.iter().filter(|e| e.is_error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationEntry> {
        self.entries.iter().filter(|e| !e.is_error)
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(|e| !e.is_error)
    }

    pub fn has_any_problem(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
