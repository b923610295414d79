//! Error types for scanning and rendering model graphs.
//!
//! [`ScanError`] covers everything the scan driver can run into. Only
//! [`ScanError::NoWorkspace`] and [`ScanError::WorkspaceUnavailable`] are
//! fatal; the remaining variants are recorded as graph warnings and the scan
//! carries on. [`ModelGraphError`] is the top-level error returned by the
//! [`crate::ModelGraphBuilder`] facade.

use std::{io, path::PathBuf};

use thiserror::Error;

use modelgraph_parser::AnalyzeError;

/// Failures raised while locating, reading or analysing source files.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No workspace root was supplied")]
    NoWorkspace,

    #[error("Workspace `{}` is unavailable: {reason}", root.display())]
    WorkspaceUnavailable { root: PathBuf, reason: String },

    #[error("Could not parse {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse {}: {source}", path.display())]
    Analyze {
        path: PathBuf,
        #[source]
        source: AnalyzeError,
    },

    #[error("Skipped directory {}: {reason}", path.display())]
    Directory { path: PathBuf, reason: String },
}

impl ScanError {
    /// Whether this error aborts the whole scan.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoWorkspace | Self::WorkspaceUnavailable { .. })
    }
}

/// The main error type for facade operations.
#[derive(Debug, Error)]
pub enum ModelGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Scan error: {0}")]
    Scan(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl From<ScanError> for ModelGraphError {
    fn from(error: ScanError) -> Self {
        Self::Scan(error.to_string())
    }
}
