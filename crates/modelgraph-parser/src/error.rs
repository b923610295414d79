//! Errors produced while analyzing a single source file.

use thiserror::Error;

/// Failure to analyze one file.
///
/// Analysis failures never abort a scan; the caller records them as
/// per-file warnings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("source is {len} bytes, larger than the {limit} byte analysis limit")]
    SourceTooLarge { len: usize, limit: usize },
}
