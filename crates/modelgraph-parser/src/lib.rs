//! Heuristic PHP source analysis for ORM model detection.
//!
//! The analyzer works on raw source text with regular expressions rather
//! than a syntax tree. For each file it extracts:
//!
//! 1. the declared namespace and the `use` import bindings ([`ImportTable`]),
//! 2. the first `class <Name> extends <Parent>` declaration and whether the
//!    parent marks it as a model ([`ClassDeclaration`]),
//! 3. every method whose body is `return $this-><helper>(<target>, ...)` with
//!    a known relationship helper ([`ExtractedRelationship`]).
//!
//! The heuristics live behind the [`SourceAnalyzer`] trait so a brace-aware
//! implementation can replace [`PhpAnalyzer`] without touching the graph
//! assembly or layout code.
//!
//! # Example
//!
//! ```
//! let source = r#"<?php
//! namespace App\Models;
//!
//! use Illuminate\Database\Eloquent\Model;
//!
//! class Post extends Model
//! {
//!     public function comments()
//!     {
//!         return $this->hasMany(Comment::class);
//!     }
//! }
//! "#;
//!
//! let analysis = modelgraph_parser::analyze(source).expect("source is small");
//! let class = analysis.class().expect("class declared");
//! assert!(class.is_model());
//! assert_eq!(class.id(), "App\\Models\\Post");
//! assert_eq!(class.relationships()[0].target_id(), "App\\Models\\Comment");
//! ```

pub mod error;

mod analyzer;
mod classify;
mod imports;
mod patterns;
mod relations;

#[cfg(test)]
mod analyzer_tests;

pub use analyzer::{
    ClassDeclaration, DEFAULT_MAX_SOURCE_LEN, ExtractedRelationship, FileAnalysis, PhpAnalyzer,
    SourceAnalyzer,
};
pub use classify::{BASE_MODEL_NAMES, BASE_MODELS};
pub use error::AnalyzeError;
pub use imports::ImportTable;
pub use relations::RELATION_HELPERS;

/// Analyzes PHP source with the default [`PhpAnalyzer`].
///
/// # Errors
///
/// Returns [`AnalyzeError::SourceTooLarge`] if the source exceeds
/// [`DEFAULT_MAX_SOURCE_LEN`] bytes.
pub fn analyze(source: &str) -> Result<FileAnalysis, AnalyzeError> {
    PhpAnalyzer::default().analyze(source)
}
