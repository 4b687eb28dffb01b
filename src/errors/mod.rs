// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Error types with educational messages
//!
//! Malformed pipeline input never surfaces here: that is reported through
//! [`crate::pipeline::ValidationReport`]. These errors cover the host side,
//! such as reading files, parsing documents and loading registry manifests.

mod educational;
mod recovery;

pub use educational::EducationalMessage;
pub use recovery::RecoverySuggestion;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for stepflow operations
pub type StepflowResult<T> = Result<T, StepflowError>;

/// Main error type for stepflow
#[derive(Error, Debug, Diagnostic)]
pub enum StepflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Registry Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Component registry not found: {path}")]
    #[diagnostic(
        code(stepflow::registry_not_found),
        help("Point --registry at a component manifest or set `registry` in stepflow.toml")
    )]
    RegistryNotFound { path: PathBuf },

    #[error("Component '{name}' ({id}) collides with an already registered component")]
    #[diagnostic(
        code(stepflow::duplicate_component),
        help("Component ids and names must both be unique within a registry")
    )]
    DuplicateComponent { id: String, name: String },

    #[error("Parameter '{parameter}' of component '{component}' has an invalid pattern: {error}")]
    #[diagnostic(code(stepflow::invalid_parameter_pattern))]
    InvalidParameterPattern {
        component: String,
        parameter: String,
        pattern: String,
        error: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline file not found: {path}")]
    #[diagnostic(
        code(stepflow::pipeline_not_found),
        help("Point --pipeline at a pipeline definition or set `pipeline` in stepflow.toml")
    )]
    PipelineNotFound { path: PathBuf },

    #[error("Pipeline definition is invalid ({errors} error(s), {warnings} warning(s))")]
    #[diagnostic(
        code(stepflow::invalid_pipeline),
        help("Run 'stepflow validate' to see every problem")
    )]
    InvalidPipeline { errors: usize, warnings: usize },

    #[error("Pipeline has {count} warning(s) and warnings are denied")]
    #[diagnostic(
        code(stepflow::warnings_denied),
        help("Fix the warnings or drop --deny-warnings")
    )]
    WarningsDenied { count: usize },

    #[error("Circular dependency detected at step '{step}'")]
    #[diagnostic(
        code(stepflow::circular_dependency),
        help("Review your step dependencies to remove the cycle")
    )]
    CircularDependency { step: String },

    #[error("Unknown validation message code: {code}")]
    #[diagnostic(
        code(stepflow::unknown_message_code),
        help("Known codes: {known}")
    )]
    UnknownMessageCode { code: String, known: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(stepflow::config_error))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(stepflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(stepflow::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(stepflow::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(stepflow::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(stepflow::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for StepflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for StepflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for StepflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for StepflowError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl StepflowError {
    /// Create a duplicate component error
    pub fn duplicate_component(id: impl ToString, name: &str) -> Self {
        Self::DuplicateComponent {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// Create a config error with a hint
    pub fn config(message: impl Into<String>, help: Option<&str>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.map(String::from),
        }
    }
}
