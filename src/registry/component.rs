// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Registered component definitions

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a registered component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub Uuid);

impl ComponentId {
    /// Generate a fresh random id
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ComponentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for ComponentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a component's behavior lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Built into the host process
    #[default]
    Internal,
    /// Provided by an external runner
    External,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::External => write!(f, "external"),
        }
    }
}

/// A parameter declared by a component's schema
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    /// Parameter key
    pub name: String,

    /// Whether every step using the component must supply it
    pub required: bool,

    /// Optional value pattern, matched unanchored
    pub pattern: Option<Regex>,
}

impl ParameterSpec {
    /// A parameter every step must supply
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            pattern: None,
        }
    }

    /// A parameter steps may omit
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            pattern: None,
        }
    }

    /// Attach a value pattern
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Check a supplied value against the pattern (no pattern accepts anything)
    pub fn accepts(&self, value: &str) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.is_match(value))
    }
}

/// A component known to the registry
#[derive(Debug, Clone)]
pub struct RegisteredComponent {
    pub id: ComponentId,
    pub name: String,
    pub description: String,
    pub kind: ComponentKind,

    /// Marks components usable only as a pipeline root
    pub is_system_event: bool,

    /// Parameter schema, in declaration order
    pub parameters: Vec<ParameterSpec>,
}

impl RegisteredComponent {
    /// Create an internal, non-event component with no parameters
    pub fn new(id: ComponentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind: ComponentKind::Internal,
            is_system_event: false,
            parameters: Vec::new(),
        }
    }

    /// Create a system-event component
    pub fn system_event(id: ComponentId, name: impl Into<String>) -> Self {
        Self {
            is_system_event: true,
            ..Self::new(id, name)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Names of the required parameters
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }
}
