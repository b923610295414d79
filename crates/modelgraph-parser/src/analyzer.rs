//! The [`SourceAnalyzer`] seam and its regex-based PHP implementation.

use log::debug;
use modelgraph_core::{identifier, model::RelationKind};

use crate::{
    classify,
    error::AnalyzeError,
    imports::{self, ImportTable},
    relations::{self, Scope},
};

/// Largest source accepted by [`PhpAnalyzer::default`], in bytes.
pub const DEFAULT_MAX_SOURCE_LEN: usize = 2 * 1024 * 1024;

/// Extracts model declarations from the text of one source file.
///
/// Implementations are pure functions of their input: they perform no I/O
/// and keep no state between calls.
pub trait SourceAnalyzer {
    /// Analyzes the text of one file.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyzeError`] if the file cannot be analyzed at all.
    /// A file without any class declaration is not an error.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, AnalyzeError>;
}

/// Everything the analyzer learned about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    namespace: String,
    imports: ImportTable,
    class: Option<ClassDeclaration>,
}

impl FileAnalysis {
    /// Declared namespace, empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    /// The file's primary `class … extends …` declaration, if any.
    pub fn class(&self) -> Option<&ClassDeclaration> {
        self.class.as_ref()
    }

    /// The primary class, but only if it was classified as a model.
    pub fn model(&self) -> Option<&ClassDeclaration> {
        self.class.as_ref().filter(|class| class.is_model)
    }

    pub fn into_class(self) -> Option<ClassDeclaration> {
        self.class
    }
}

/// A class declaration with a resolved parent.
///
/// Relationships are extracted for every declaration, not only models, so
/// that a class can still be promoted once its parent turns out to be a
/// model declared in another file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    id: String,
    parent_id: String,
    is_model: bool,
    relationships: Vec<ExtractedRelationship>,
}

impl ClassDeclaration {
    /// Canonical identifier of the class.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        identifier::simple_name(&self.id)
    }

    /// Canonical identifier of the declared parent class.
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Whether the parent alone marks this class as a model.
    pub fn is_model(&self) -> bool {
        self.is_model
    }

    /// Relationship methods in declaration order.
    pub fn relationships(&self) -> &[ExtractedRelationship] {
        &self.relationships
    }
}

/// A relationship method found in a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRelationship {
    method: String,
    kind: RelationKind,
    target_id: String,
}

impl ExtractedRelationship {
    pub fn new(method: impl Into<String>, kind: RelationKind, target_id: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            kind,
            target_id: target_id.into(),
        }
    }

    /// Name of the declaring method.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn kind(&self) -> &RelationKind {
        &self.kind
    }

    /// Canonical identifier of the related model.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }
}

/// Regex-driven analyzer for PHP sources.
///
/// The class body is taken to be everything from the class declaration to
/// the end of the file, so methods of a second class in the same file are
/// attributed to the first one.
#[derive(Debug, Clone)]
pub struct PhpAnalyzer {
    max_source_len: usize,
}

impl PhpAnalyzer {
    pub fn new() -> Self {
        Self {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
        }
    }

    /// Sets the largest source, in bytes, the analyzer accepts.
    pub fn with_max_source_len(mut self, max_source_len: usize) -> Self {
        self.max_source_len = max_source_len;
        self
    }
}

impl Default for PhpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAnalyzer for PhpAnalyzer {
    fn analyze(&self, source: &str) -> Result<FileAnalysis, AnalyzeError> {
        if source.len() > self.max_source_len {
            return Err(AnalyzeError::SourceTooLarge {
                len: source.len(),
                limit: self.max_source_len,
            });
        }

        let namespace = imports::parse_namespace(source);
        let imports = ImportTable::parse(source);

        let class = classify::find_class(source).map(|raw| {
            let id = identifier::qualify(&namespace, &raw.name);
            let parent_id = classify::resolve_parent(&raw.parent, &imports, &namespace);
            let is_model = classify::is_model_parent(&parent_id);
            debug!(class = id, parent = parent_id, is_model; "Classified class declaration");

            let scope = Scope {
                class_id: &id,
                namespace: &namespace,
                imports: &imports,
            };
            let relationships = relations::extract(&source[raw.offset..], &scope);

            ClassDeclaration {
                id,
                parent_id,
                is_model,
                relationships,
            }
        });

        Ok(FileAnalysis {
            namespace,
            imports,
            class,
        })
    }
}
