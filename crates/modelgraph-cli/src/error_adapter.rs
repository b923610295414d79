//! Error adapter for converting ModelGraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use modelgraph::ModelGraphError;

/// Adapter for [`ModelGraphError`] variants.
///
/// None of the variants carry source locations, so only a code and an
/// optional help line are attached.
pub struct ErrorAdapter<'a>(pub &'a ModelGraphError);

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
            ModelGraphError::Io(_) => "modelgraph::io",
            ModelGraphError::Scan(_) => "modelgraph::scan",
            ModelGraphError::Config(_) => "modelgraph::config",
            ModelGraphError::Export(_) => "modelgraph::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ModelGraphError::Scan(_) => "pass an existing, readable directory as the workspace root",
            ModelGraphError::Config(_) => {
                "check the file given with --config or modelgraph/config.toml"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`ModelGraphError`] into a list of reportable errors.
pub fn to_reportables(err: &ModelGraphError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}
