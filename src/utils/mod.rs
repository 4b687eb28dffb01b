// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Utility modules
//!
//! Common utilities for the stepflow CLI.

pub mod colors;

pub use colors::*;
