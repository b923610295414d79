//! Model classification by declared parent type.

use modelgraph_core::identifier;

use crate::{imports::ImportTable, patterns};

/// Fully-qualified base classes that mark a class as a model.
pub const BASE_MODELS: &[&str] = &[
    "Illuminate\\Database\\Eloquent\\Model",
    "Illuminate\\Foundation\\Auth\\User",
];

/// Simple names that mark a class as a model regardless of namespace.
pub const BASE_MODEL_NAMES: &[&str] = &["Model", "Authenticatable"];

const MODEL_SUFFIX: &str = "Model";

/// The first `class … extends …` declaration of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawClass {
    pub(crate) name: String,
    pub(crate) parent: String,
    /// Byte offset of the declaration; the class body is assumed to run
    /// from here to the end of the file.
    pub(crate) offset: usize,
}

pub(crate) fn find_class(source: &str) -> Option<RawClass> {
    let caps = patterns::CLASS.captures(source)?;
    let declaration = caps.get(0)?;
    Some(RawClass {
        name: caps[1].to_string(),
        parent: caps[2].to_string(),
        offset: declaration.start(),
    })
}

/// Resolves a parent class name to a canonical identifier.
///
/// Import aliases win; an already-qualified name is taken as is; anything
/// else is assumed to live in the file's own namespace.
pub(crate) fn resolve_parent(parent: &str, imports: &ImportTable, namespace: &str) -> String {
    let parent = identifier::normalize(parent);
    if let Some(fqn) = imports.resolve(parent) {
        return fqn.to_string();
    }
    if identifier::is_qualified(parent) {
        return parent.to_string();
    }
    identifier::qualify(namespace, parent)
}

/// Returns `true` if a class extending `parent_id` is a model.
///
/// Besides the known base classes, any parent whose simple name ends in
/// `Model` counts, which also admits some non-ORM classes.
pub(crate) fn is_model_parent(parent_id: &str) -> bool {
    let simple = identifier::simple_name(parent_id);
    BASE_MODELS.contains(&parent_id)
        || BASE_MODEL_NAMES.contains(&simple)
        || simple.ends_with(MODEL_SUFFIX)
}
