// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! stepflow - Pipeline Definition Validator
//!
//! Validate pipeline definitions against a component registry.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stepflow::cli::{Cli, Commands};
use stepflow::config::{Settings, SETTINGS_FILE};
use stepflow::utils::should_use_colors;
use stepflow::StepflowError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    let settings = load_settings(&cli)?;
    init_tracing(&settings, cli.verbose);

    if !should_use_colors() {
        colored::control::set_override(false);
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Validate {
            registry,
            pipeline,
            format,
            deny_warnings,
            explain,
        } => {
            let settings = settings.with_overrides(registry, pipeline, deny_warnings);
            stepflow::cli::validate::run(settings, format, explain, cli.verbose).await
        }
        Commands::Graph {
            registry,
            pipeline,
            format,
        } => {
            let settings = settings.with_overrides(registry, pipeline, false);
            stepflow::cli::graph::run(settings, format, cli.verbose).await
        }
        Commands::Components { registry, format } => {
            let settings = settings.with_overrides(registry, None, false);
            stepflow::cli::components::run(settings, format, cli.verbose).await
        }
        Commands::Explain { code } => stepflow::cli::explain::run(code, cli.verbose).await,
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    match &cli.config {
        Some(path) if !path.exists() => Err(StepflowError::config(
            format!("Settings file not found: {}", path.display()),
            Some("Drop --config to fall back to stepflow.toml in the working directory"),
        )
        .into()),
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::load(std::path::Path::new(SETTINGS_FILE))?),
    }
}

fn init_tracing(settings: &Settings, verbose: bool) {
    let fallback = match (&settings.log, verbose) {
        (_, true) => "stepflow=debug".to_string(),
        (Some(directive), false) => directive.clone(),
        (None, false) => "stepflow=warn".to_string(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("stepflow=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
