// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Components command - list the registry

use miette::Result;

use super::OutputFormat;
use crate::config::Settings;
use crate::errors::StepflowError;
use crate::registry::{ComponentManifest, ComponentRegistry, RegistryManifest};
use crate::utils::colors::{code, dimmed, print_header, print_numbered};

/// Run the components command
pub async fn run(settings: Settings, format: OutputFormat, verbose: bool) -> Result<()> {
    let registry = ComponentRegistry::from_file(&settings.registry)?;

    let mut components: Vec<_> = registry.components().collect();
    components.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    if format == OutputFormat::Json {
        let manifest = RegistryManifest {
            components: components
                .iter()
                .map(|c| ComponentManifest::from(c.as_ref()))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&manifest).map_err(StepflowError::from)?;
        println!("{}", json);
        return Ok(());
    }

    print_header(&format!("Components ({})", settings.registry.display()));

    if components.is_empty() {
        println!("{}", dimmed("  (registry is empty)"));
        return Ok(());
    }

    for (i, component) in components.iter().enumerate() {
        let mut line = format!("{} {}", code(&component.name), dimmed(&component.id.to_string()));
        if component.is_system_event {
            line.push_str(" [system event]");
        }
        print_numbered(i + 1, &line);

        if verbose {
            if !component.description.is_empty() {
                println!("     {}", component.description);
            }
            println!("     kind: {}", component.kind);
            for parameter in &component.parameters {
                let requirement = if parameter.required { "required" } else { "optional" };
                match &parameter.pattern {
                    Some(pattern) => println!(
                        "     - {} ({}, matches {})",
                        parameter.name,
                        requirement,
                        code(pattern.as_str())
                    ),
                    None => println!("     - {} ({})", parameter.name, requirement),
                }
            }
        }
    }

    Ok(())
}
