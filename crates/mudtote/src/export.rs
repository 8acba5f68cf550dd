//! Export functionality for Mudtote diagrams.
//!
//! Every backend reads the same geometry from `mudtote_core`, so an edge
//! drawn in the SVG document and the same edge drawn in the TikZ document
//! start, bend and end at corresponding points.
//!
//! # Available Backends
//!
//! - [`svg`] — standalone SVG document via [`svg::Svg`]
//! - [`tikz`] — LaTeX/TikZ document via [`tikz::Tikz`]
//! - [`json`] — the persisted diagram schema via [`json::Json`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`MudtoteError::Export`] at the crate
//! boundary.
//!
//! [`MudtoteError::Export`]: crate::MudtoteError::Export

pub mod json;
pub mod latex;
pub mod svg;
pub mod tikz;

use std::{fmt, io};

use mudtote_core::model::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Serializes `diagram` to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, Error>;

    /// Conventional file extension of the output, without the dot.
    fn file_extension(&self) -> &'static str;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
