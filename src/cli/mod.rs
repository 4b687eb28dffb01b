// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for stepflow.

pub mod components;
pub mod explain;
pub mod graph;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Settings;
use crate::pipeline::PipelineConfiguration;
use crate::registry::ComponentRegistry;

/// Pipeline definition validator
///
/// Check pipeline definitions against a component registry and inspect the
/// resulting execution graph.
#[derive(Parser, Debug)]
#[clap(
    name = "stepflow",
    version,
    about = "Validate pipeline definitions and build their execution graph",
    long_about = None,
    after_help = "Examples:\n\
        stepflow validate                       Validate pipeline.yaml against components.yaml\n\
        stepflow validate -p build.json         Validate another pipeline file\n\
        stepflow graph --format mermaid         Render the execution graph\n\
        stepflow explain DanglingStep           Explain a report message\n\n\
        See 'stepflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Settings file (defaults to stepflow.toml)
    #[clap(short, long, global = true, value_name = "FILE", env = "STEPFLOW_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a pipeline definition
    Validate {
        /// Component registry manifest
        #[clap(short, long)]
        registry: Option<PathBuf>,

        /// Pipeline definition
        #[clap(short, long)]
        pipeline: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Fail when the report contains warnings
        #[clap(long)]
        deny_warnings: bool,

        /// Explain each kind of problem found
        #[clap(long)]
        explain: bool,
    },

    /// Show the validated pipeline as a graph
    Graph {
        /// Component registry manifest
        #[clap(short, long)]
        registry: Option<PathBuf>,

        /// Pipeline definition
        #[clap(short, long)]
        pipeline: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },

    /// List registered components
    Components {
        /// Component registry manifest
        #[clap(short, long)]
        registry: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Explain a validation message code
    Explain {
        /// Message code, e.g. DanglingStep
        code: String,
    },
}

/// Output format for reports and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

/// Load the registry and pipeline named by the settings
pub(crate) fn load_inputs(
    settings: &Settings,
    verbose: bool,
) -> miette::Result<(ComponentRegistry, PipelineConfiguration)> {
    let registry = ComponentRegistry::from_file(&settings.registry)?;
    let configuration = PipelineConfiguration::from_file(&settings.pipeline)?;

    if verbose {
        println!(
            "  {} Loaded {} component(s) from {}",
            "✓".green(),
            registry.len(),
            settings.registry.display()
        );
        println!(
            "  {} Loaded {} step(s) from {}",
            "✓".green(),
            configuration.len(),
            settings.pipeline.display()
        );
    }

    Ok((registry, configuration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from([
            "stepflow",
            "validate",
            "--pipeline",
            "build.json",
            "--format",
            "json",
            "--deny-warnings",
        ]);

        match cli.command {
            Commands::Validate {
                pipeline,
                registry,
                format,
                deny_warnings,
                explain,
            } => {
                assert_eq!(pipeline, Some(PathBuf::from("build.json")));
                assert_eq!(registry, None);
                assert_eq!(format, OutputFormat::Json);
                assert!(deny_warnings);
                assert!(!explain);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_graph_format() {
        let cli = Cli::parse_from(["stepflow", "graph", "-f", "mermaid", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Graph {
                format: GraphFormat::Mermaid,
                ..
            }
        ));
    }
}
