// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Validate command - check a pipeline definition

use std::collections::HashSet;

use colored::Colorize;
use miette::Result;
use serde::Serialize;

use super::{load_inputs, OutputFormat};
use crate::config::Settings;
use crate::errors::{EducationalMessage, RecoverySuggestion, StepflowError};
use crate::pipeline::{PipelineValidator, ValidationEntry, ValidationMessage};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    valid: bool,
    entries: &'a [ValidationEntry],
}

/// Run the validate command
pub async fn run(settings: Settings, format: OutputFormat, explain: bool, verbose: bool) -> Result<()> {
    if format == OutputFormat::Text {
        println!("{}", "Validating pipeline...".bold());
        println!();
    }

    let (registry, configuration) = load_inputs(&settings, verbose && format == OutputFormat::Text)?;
    let outcome = PipelineValidator::validate(&registry, &configuration);
    let report = &outcome.report;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonReport {
                valid: outcome.is_valid(),
                entries: report.entries(),
            })
            .map_err(StepflowError::from)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print_entries("Errors", report.errors(), |e| format!("  {} {}", "✗".red(), e));
            print_entries("Warnings", report.warnings(), |e| {
                format!("  {} {}", "⚠".yellow(), e)
            });

            if explain {
                print_explanations(report.entries());
            }

            if verbose {
                if let Some(pipeline) = &outcome.pipeline {
                    println!();
                    println!("{}:", "Pipeline summary".bold());
                    if let Some(name) = pipeline.name() {
                        println!("  Name: {}", name);
                    }
                    println!("  Steps: {}", pipeline.len());
                    match pipeline.root() {
                        Some(root) => println!("  Root: {}", root),
                        None => println!("  Root: {}", "none".dimmed()),
                    }
                }
            }

            println!();
        }
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if errors > 0 {
        return Err(StepflowError::InvalidPipeline { errors, warnings }.into());
    }

    if warnings > 0 && settings.deny_warnings {
        return Err(StepflowError::WarningsDenied { count: warnings }.into());
    }

    if format == OutputFormat::Text {
        if warnings > 0 {
            println!("{}", "Pipeline is valid but has warnings.".yellow().bold());
        } else {
            println!("{}", "Pipeline is valid!".green().bold());
        }
    }

    Ok(())
}

fn print_entries<'a>(
    title: &str,
    entries: impl Iterator<Item = &'a ValidationEntry>,
    line: impl Fn(&ValidationEntry) -> String,
) {
    let mut entries = entries.peekable();
    if entries.peek().is_none() {
        return;
    }

    println!();
    println!("{}:", title.bold());
    for entry in entries {
        println!("{}", line(entry));
    }
}

fn print_explanations(entries: &[ValidationEntry]) {
    let mut seen = HashSet::new();
    let messages: Vec<ValidationMessage> = entries
        .iter()
        .map(|e| e.message)
        .filter(|m| seen.insert(*m))
        .collect();

    for message in messages {
        println!();
        println!("{}", format!("[{}]", message).cyan());
        print!("{}", EducationalMessage::for_message(message));
        println!();
        print!("{}", RecoverySuggestion::for_message(message));
    }
}
