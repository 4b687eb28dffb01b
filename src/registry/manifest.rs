// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Registry manifest
//!
//! On-disk shape of a component catalog. Patterns are kept as strings here
//! and compiled when the manifest is turned into registered components.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::component::{ComponentId, ComponentKind, ParameterSpec, RegisteredComponent};
use crate::config::DocumentFormat;
use crate::errors::{StepflowError, StepflowResult};

/// Component catalog as written in a manifest file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryManifest {
    #[serde(default)]
    pub components: Vec<ComponentManifest>,
}

/// One component entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentManifest {
    pub id: ComponentId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub kind: ComponentKind,

    #[serde(default)]
    pub is_system_event: bool,

    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
}

/// One parameter declared by a component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterManifest {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl RegistryManifest {
    /// Load a manifest, picking the format from the file extension
    pub fn from_file(path: &Path) -> StepflowResult<Self> {
        DocumentFormat::from_path(path).load(path)
    }

    /// Parse a manifest from YAML
    pub fn from_yaml(yaml: &str) -> StepflowResult<Self> {
        DocumentFormat::Yaml.parse(yaml)
    }
}

impl ComponentManifest {
    /// Compile patterns and produce the registered component
    pub fn into_component(self) -> StepflowResult<RegisteredComponent> {
        let mut parameters = Vec::with_capacity(self.parameters.len());

        for parameter in self.parameters {
            let pattern = match &parameter.pattern {
                Some(raw) => Some(Regex::new(raw).map_err(|e| {
                    StepflowError::InvalidParameterPattern {
                        component: self.name.clone(),
                        parameter: parameter.name.clone(),
                        pattern: raw.clone(),
                        error: e.to_string(),
                    }
                })?),
                None => None,
            };

            parameters.push(ParameterSpec {
                name: parameter.name,
                required: parameter.required,
                pattern,
            });
        }

        Ok(RegisteredComponent {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: self.kind,
            is_system_event: self.is_system_event,
            parameters,
        })
    }
}

impl From<&RegisteredComponent> for ComponentManifest {
    fn from(component: &RegisteredComponent) -> Self {
        Self {
            id: component.id,
            name: component.name.clone(),
            description: component.description.clone(),
            kind: component.kind,
            is_system_event: component.is_system_event,
            parameters: component
                .parameters
                .iter()
                .map(|p| ParameterManifest {
                    name: p.name.clone(),
                    required: p.required,
                    pattern: p.pattern.as_ref().map(|r| r.as_str().to_string()),
                })
                .collect(),
        }
    }
}
