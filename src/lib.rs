// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! # stepflow - Pipeline Definition Validator
//!
//! `stepflow` checks a declarative pipeline definition against a registry of
//! known components and, when the definition is sound, builds the execution
//! graph a runner walks.
//!
//! ## Features
//!
//! - **Component registry** - Catalog of step kinds, loaded from YAML, JSON or TOML
//! - **Full report** - Every problem found in a pass, with error or warning severity
//! - **Execution graph** - Dependency DAG with a single root and topological order
//! - **Educational** - Every report code explains itself and how to fix it
//!
//! ## Quick Start
//!
//! ```bash
//! # Validate pipeline.yaml against components.yaml
//! stepflow validate
//!
//! # Render the execution graph
//! stepflow graph --format dot
//!
//! # Learn about a report code
//! stepflow explain CyclicDependencyDetected
//! ```
//!
//! ## Library use
//!
//! ```
//! use stepflow::{ComponentRegistry, PipelineConfiguration, PipelineValidator};
//! use stepflow::registry::{ComponentId, RegisteredComponent};
//! use stepflow::pipeline::{PipelineStep, StepId};
//!
//! let trigger = ComponentId::new_v4();
//! let mut registry = ComponentRegistry::new();
//! registry.add_component(RegisteredComponent::system_event(trigger, "on-push"));
//!
//! let root = StepId::new_v4();
//! let configuration = PipelineConfiguration::new(vec![PipelineStep::new(root, trigger)]);
//!
//! let outcome = PipelineValidator::validate(&registry, &configuration);
//! assert!(outcome.is_valid());
//! assert_eq!(outcome.pipeline.unwrap().root(), Some(root));
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod registry;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use errors::{StepflowError, StepflowResult};
pub use pipeline::{
    Pipeline, PipelineConfiguration, PipelineValidator, ValidationMessage, ValidationOutcome,
    ValidationReport,
};
pub use registry::ComponentRegistry;
