// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Pipeline definitions, validation and the validated graph
//!
//! A [`PipelineConfiguration`] is what users write. [`PipelineValidator`]
//! checks it against a [`crate::registry::ComponentRegistry`] and, when it
//! holds up, materializes a [`Pipeline`].

mod dag;
mod definition;
mod report;
mod validation;

pub use dag::{Pipeline, PipelineNode};
pub use definition::*;
pub use report::{ValidationEntry, ValidationMessage, ValidationReport};
pub use validation::{PipelineValidator, ValidationOutcome};
