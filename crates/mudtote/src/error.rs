//! Error types for Mudtote operations.
//!
//! This module provides the main error type [`MudtoteError`] which wraps
//! the error conditions that can occur while importing, rendering and
//! dispatching diagram commands.

use std::io;

use thiserror::Error;

use crate::validate::Issue;

/// The main error type for Mudtote operations.
///
/// # Diagnostic Variants
///
/// The `Validation` variant carries every problem found in an imported
/// diagram so a front end can report each one separately.
#[derive(Debug, Error)]
pub enum MudtoteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid diagram JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Diagram failed validation with {} error(s)", .0.len())]
    Validation(Vec<Issue>),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),

    #[error("Unknown command `{0}`")]
    UnknownCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
