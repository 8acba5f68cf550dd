//! Error adapter for converting MudtoteError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`MudtoteError::Validation`] carries several issues, each issue is
//! rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity};

use mudtote::{
    MudtoteError,
    validate::{Issue, Severity},
};

/// Adapter for a single validation [`Issue`].
#[derive(Debug)]
pub struct IssueAdapter<'a>(pub &'a Issue);

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.0.element_id(), self.0.message())
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("mudtote::validate"))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.0.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("ids must be unique and coordinates finite numbers"))
    }
}

/// Adapter for non-validation [`MudtoteError`] variants.
///
/// This adapter handles errors that don't carry per-element information,
/// such as I/O errors, JSON syntax errors, configuration and export errors.
pub struct ErrorAdapter<'a>(pub &'a MudtoteError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MudtoteError::Io(_) => "mudtote::io",
            MudtoteError::Json(_) => "mudtote::json",
            MudtoteError::Validation(_) => "mudtote::validate",
            MudtoteError::Export(_) => "mudtote::export",
            MudtoteError::UnknownCommand(_) => "mudtote::command",
            MudtoteError::Config(_) => "mudtote::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            MudtoteError::Json(_) => Some(Box::new(
                "the input must be a diagram with `nodes`, `edges`, `entryPoints` and `exitPoints`",
            )),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One validation issue.
    Issue(IssueAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Issue(i) => i.severity(),
            Reportable::Error(_) => None,
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`MudtoteError`] into a list of reportable errors.
///
/// For [`MudtoteError::Validation`], this returns one [`Reportable`] for
/// each issue. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &MudtoteError) -> Vec<Reportable<'_>> {
    match err {
        MudtoteError::Validation(issues) => issues
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_reportable_per_issue() {
        let err = MudtoteError::Validation(vec![
            Issue::error("a", "duplicate node id"),
            Issue::error("e1", "duplicate edge id"),
            Issue::warning("e2", "source `x` does not exist; the edge will not be drawn"),
        ]);

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 3);
        assert_eq!(reportables[0].to_string(), "`a`: duplicate node id");
        assert_eq!(reportables[1].to_string(), "`e1`: duplicate edge id");
        assert_eq!(reportables[2].severity(), Some(MietteSeverity::Warning));
        assert_eq!(reportables[0].severity(), Some(MietteSeverity::Error));
    }

    #[test]
    fn test_non_validation_error() {
        let err = MudtoteError::UnknownCommand("frobnicate".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Unknown command `frobnicate`");
                assert_eq!(e.code().unwrap().to_string(), "mudtote::command");
            }
            Reportable::Issue(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_json_error_has_help() {
        let err = mudtote::DiagramExporter::default()
            .parse_json("{ \"nodes\": 3 }")
            .unwrap_err();
        assert!(matches!(err, MudtoteError::Json(_)));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert!(reportables[0].help().is_some());
    }
}
