// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Pipeline definition structures
//!
//! The user-authored input: a flat list of steps, each naming a component and
//! the steps it depends on. Nothing here is validated yet.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DocumentFormat;
use crate::errors::{StepflowError, StepflowResult};
use crate::registry::ComponentId;

/// Identifier of a step within one pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub Uuid);

impl StepId {
    /// Generate a fresh random id
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for StepId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for StepId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single configured use of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    /// Step id (expected unique, not guaranteed)
    pub step_id: StepId,

    /// Referenced component (not yet checked against the registry)
    pub component_id: ComponentId,

    /// Parameter values, keyed by parameter name
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Steps that must precede this one
    #[serde(default)]
    pub dependencies: Vec<StepId>,
}

impl PipelineStep {
    /// Create a step with no parameters or dependencies
    pub fn new(step_id: StepId, component_id: ComponentId) -> Self {
        Self {
            step_id,
            component_id,
            parameters: BTreeMap::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: StepId) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Pipeline configuration as authored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfiguration {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Steps in declaration order
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

impl PipelineConfiguration {
    pub fn new(steps: Vec<PipelineStep>) -> Self {
        Self { name: None, steps }
    }

    /// Load a configuration, picking the format from the file extension
    pub fn from_file(path: &Path) -> StepflowResult<Self> {
        if !path.exists() {
            return Err(StepflowError::PipelineNotFound {
                path: path.to_path_buf(),
            });
        }

        DocumentFormat::from_path(path).load(path)
    }

    /// Parse a configuration from YAML
    pub fn from_yaml(yaml: &str) -> StepflowResult<Self> {
        DocumentFormat::Yaml.parse(yaml)
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> StepflowResult<Self> {
        DocumentFormat::Json.parse(json)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> StepflowResult<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Get the first step declared with this id
    pub fn get_step(&self, step_id: StepId) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
