// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Explain command - describe a validation message code

use miette::Result;

use crate::errors::{EducationalMessage, RecoverySuggestion};
use crate::pipeline::ValidationMessage;
use crate::utils::colors::{dimmed, print_header, print_section};

/// Run the explain command
pub async fn run(code: String, verbose: bool) -> Result<()> {
    let message: ValidationMessage = code.parse()?;

    print_header(message.code());
    println!("{}", dimmed(message.describe()));
    println!();
    print!("{}", EducationalMessage::for_message(message));

    print_section("How to fix");
    print!("{}", RecoverySuggestion::for_message(message));

    if verbose {
        print_section("All codes");
        for other in ValidationMessage::ALL {
            println!("  • {}", other.code());
        }
    }

    Ok(())
}
