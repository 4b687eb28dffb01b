// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Terminal color utilities

use std::io::IsTerminal;

use colored::Colorize;

/// Style for secondary text
pub fn dimmed(msg: &str) -> colored::ColoredString {
    msg.dimmed()
}

/// Style for identifiers and commands
pub fn code(msg: &str) -> colored::ColoredString {
    msg.cyan()
}

/// Whether stdout should be colored
///
/// `NO_COLOR` disables colors, as does output that is not a terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }

    std::io::stdout().is_terminal()
}

/// Print a header with an underline
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "═".repeat(title.chars().count().max(40)));
}

/// Print a section title
pub fn print_section(title: &str) {
    println!();
    println!("{}:", title.bold());
}

/// Print a numbered item
pub fn print_numbered(num: usize, content: &str) {
    println!("  {:>2}. {}", num, content);
}
