// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Graph command - visualize the validated pipeline

use colored::Colorize;
use miette::Result;

use super::{load_inputs, GraphFormat};
use crate::config::Settings;
use crate::pipeline::PipelineValidator;

/// Run the graph command
pub async fn run(settings: Settings, format: GraphFormat, verbose: bool) -> Result<()> {
    let (registry, configuration) = load_inputs(&settings, false)?;
    let outcome = PipelineValidator::validate(&registry, &configuration);

    if verbose {
        for warning in outcome.report.warnings() {
            eprintln!("  {} {}", "⚠".yellow(), warning);
        }
    }

    for error in outcome.report.errors() {
        eprintln!("  {} {}", "✗".red(), error);
    }

    let pipeline = outcome.into_pipeline()?;

    let output = match format {
        GraphFormat::Text => pipeline.to_text()?,
        GraphFormat::Dot => pipeline.to_dot(),
        GraphFormat::Mermaid => pipeline.to_mermaid(),
    };

    println!("{}", output);

    Ok(())
}
