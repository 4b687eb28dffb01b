// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Configuration loading
//!
//! Settings for the command-line host come from `stepflow.toml`. Registry
//! manifests and pipeline definitions may be YAML, JSON or TOML, chosen by
//! file extension.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{StepflowError, StepflowResult};

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "stepflow.toml";

/// Host settings from stepflow.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Component registry manifest
    #[serde(default = "default_registry")]
    pub registry: PathBuf,

    /// Pipeline definition
    #[serde(default = "default_pipeline")]
    pub pipeline: PathBuf,

    /// Treat dangling-step warnings as failures
    #[serde(default)]
    pub deny_warnings: bool,

    /// Tracing filter directive (overridden by RUST_LOG)
    #[serde(default)]
    pub log: Option<String>,
}

fn default_registry() -> PathBuf {
    PathBuf::from("components.yaml")
}

fn default_pipeline() -> PathBuf {
    PathBuf::from("pipeline.yaml")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            pipeline: default_pipeline(),
            deny_warnings: false,
            log: None,
        }
    }
}

impl Settings {
    /// Load from file; a missing file yields the defaults
    pub fn load(path: &Path) -> StepflowResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| StepflowError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Load from a directory (looks for stepflow.toml)
    pub fn load_from_dir(dir: &Path) -> StepflowResult<Self> {
        Self::load(&dir.join(SETTINGS_FILE))
    }

    /// Parse settings from TOML
    pub fn from_toml(content: &str) -> StepflowResult<Self> {
        toml::from_str(content).map_err(|e| {
            StepflowError::config(
                e.to_string(),
                Some("Known keys: registry, pipeline, deny_warnings, log"),
            )
        })
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        registry: Option<PathBuf>,
        pipeline: Option<PathBuf>,
        deny_warnings: bool,
    ) -> Self {
        if let Some(registry) = registry {
            self.registry = registry;
        }
        if let Some(pipeline) = pipeline {
            self.pipeline = pipeline;
        }
        self.deny_warnings |= deny_warnings;
        self
    }
}

/// Serialization format of a registry or pipeline document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from the extension; anything unrecognized is YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Parse a document
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> StepflowResult<T> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(Into::into),
            Self::Json => serde_json::from_str(content).map_err(Into::into),
            Self::Toml => toml::from_str(content).map_err(Into::into),
        }
    }

    /// Read and parse a document
    pub fn load<T: DeserializeOwned>(self, path: &Path) -> StepflowResult<T> {
        let content = std::fs::read_to_string(path).map_err(|e| StepflowError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        self.parse(&content)
    }
}
