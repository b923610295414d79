//! The relationship graph data model.
//!
//! A [`Graph`] is the result of one scan: the detected [`ModelNode`]s keyed
//! by canonical identifier, the [`Relationship`]s declared between them, and
//! the diagnostics collected along the way. A graph is built fresh for every
//! scan and is never mutated afterwards; presentation state such as node
//! positions lives outside of it.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::identifier;

/// How many instances one side of a relationship may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    /// Returns the wider of two cardinalities: `Many` wins over `One`.
    pub fn widen(self, other: Cardinality) -> Cardinality {
        if self == Cardinality::Many || other == Cardinality::Many {
            Cardinality::Many
        } else {
            Cardinality::One
        }
    }

    /// Returns `true` for [`Cardinality::Many`].
    pub fn is_many(self) -> bool {
        matches!(self, Cardinality::Many)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::One => write!(f, "one"),
            Cardinality::Many => write!(f, "many"),
        }
    }
}

/// Classification label derived from a pair of side cardinalities.
///
/// Mixed cardinalities are always reported as `"One To Many"`; callers that
/// care about direction orient the edge so the `one` side comes first.
pub fn cardinality_label(a: Cardinality, b: Cardinality) -> &'static str {
    match (a, b) {
        (Cardinality::One, Cardinality::One) => "One To One",
        (Cardinality::Many, Cardinality::Many) => "Many To Many",
        _ => "One To Many",
    }
}

/// The relationship-declaring helper a model method returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationKind {
    HasOne,
    MorphOne,
    HasOneThrough,
    BelongsTo,
    MorphTo,
    HasMany,
    MorphMany,
    HasManyThrough,
    BelongsToMany,
    MorphToMany,
    MorphedByMany,
    /// A helper outside the known vocabulary, kept by name.
    Other(String),
}

impl RelationKind {
    /// Maps a helper method name to its kind.
    pub fn from_helper(name: &str) -> Self {
        match name {
            "hasOne" => Self::HasOne,
            "morphOne" => Self::MorphOne,
            "hasOneThrough" => Self::HasOneThrough,
            "belongsTo" => Self::BelongsTo,
            "morphTo" => Self::MorphTo,
            "hasMany" => Self::HasMany,
            "morphMany" => Self::MorphMany,
            "hasManyThrough" => Self::HasManyThrough,
            "belongsToMany" => Self::BelongsToMany,
            "morphToMany" => Self::MorphToMany,
            "morphedByMany" => Self::MorphedByMany,
            other => Self::Other(other.to_string()),
        }
    }

    /// The helper method name this kind was parsed from.
    pub fn helper_name(&self) -> &str {
        match self {
            Self::HasOne => "hasOne",
            Self::MorphOne => "morphOne",
            Self::HasOneThrough => "hasOneThrough",
            Self::BelongsTo => "belongsTo",
            Self::MorphTo => "morphTo",
            Self::HasMany => "hasMany",
            Self::MorphMany => "morphMany",
            Self::HasManyThrough => "hasManyThrough",
            Self::BelongsToMany => "belongsToMany",
            Self::MorphToMany => "morphToMany",
            Self::MorphedByMany => "morphedByMany",
            Self::Other(name) => name,
        }
    }

    /// Human-readable classification. Unknown helpers are labelled with
    /// their own name.
    pub fn label(&self) -> &str {
        match self {
            Self::HasOne | Self::MorphOne | Self::HasOneThrough | Self::BelongsTo | Self::MorphTo => {
                "One To One"
            }
            Self::HasMany | Self::MorphMany | Self::HasManyThrough => "One To Many",
            Self::BelongsToMany | Self::MorphToMany | Self::MorphedByMany => "Many To Many",
            Self::Other(name) => name,
        }
    }

    /// Cardinality of the declaring (source) side and of the related
    /// (target) side.
    pub fn cardinalities(&self) -> (Cardinality, Cardinality) {
        use Cardinality::{Many, One};

        match self {
            Self::HasOne | Self::MorphOne | Self::HasOneThrough => (One, One),
            Self::BelongsTo | Self::MorphTo => (Many, One),
            Self::HasMany | Self::MorphMany | Self::HasManyThrough => (One, Many),
            Self::BelongsToMany | Self::MorphToMany | Self::MorphedByMany => (Many, Many),
            Self::Other(_) => (One, One),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.helper_name())
    }
}

impl Serialize for RelationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.helper_name())
    }
}

/// A detected or referenced model class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelNode {
    id: String,
    simple_name: String,
    namespace: String,
    source_path: Option<PathBuf>,
    display_path: Option<String>,
    placeholder: bool,
}

impl ModelNode {
    /// A model whose declaration was found in `source_path`.
    ///
    /// `display_path` is the path relative to the scan root.
    pub fn declared(
        id: &str,
        source_path: impl Into<PathBuf>,
        display_path: impl Into<String>,
    ) -> Self {
        let id = identifier::normalize(id);
        Self {
            id: id.to_string(),
            simple_name: identifier::simple_name(id).to_string(),
            namespace: identifier::namespace_of(id).to_string(),
            source_path: Some(source_path.into()),
            display_path: Some(display_path.into()),
            placeholder: false,
        }
    }

    /// A model that is only known because a relationship points at it.
    pub fn placeholder(id: &str) -> Self {
        let id = identifier::normalize(id);
        Self {
            id: id.to_string(),
            simple_name: identifier::simple_name(id).to_string(),
            namespace: identifier::namespace_of(id).to_string(),
            source_path: None,
            display_path: None,
            placeholder: true,
        }
    }

    /// Canonical identifier, unique within a graph.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last segment of the identifier.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Identifier minus the simple name; empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Absolute path of the declaring file; `None` for placeholders.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Declaring file relative to the scan root; `None` for placeholders.
    pub fn display_path(&self) -> Option<&str> {
        self.display_path.as_deref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// A directed association declared by a method on the source model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    source_id: String,
    target_id: String,
    kind: RelationKind,
    label: String,
    method: String,
    source_cardinality: Cardinality,
    target_cardinality: Cardinality,
    declaring_file: PathBuf,
}

impl Relationship {
    /// Creates a relationship; label and cardinalities are derived from
    /// `kind`.
    pub fn new(
        source_id: &str,
        target_id: &str,
        kind: RelationKind,
        method: impl Into<String>,
        declaring_file: impl Into<PathBuf>,
    ) -> Self {
        let (source_cardinality, target_cardinality) = kind.cardinalities();
        Self {
            source_id: identifier::normalize(source_id).to_string(),
            target_id: identifier::normalize(target_id).to_string(),
            label: kind.label().to_string(),
            kind,
            method: method.into(),
            source_cardinality,
            target_cardinality,
            declaring_file: declaring_file.into(),
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn kind(&self) -> &RelationKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the method that declared the relationship.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn source_cardinality(&self) -> Cardinality {
        self.source_cardinality
    }

    pub fn target_cardinality(&self) -> Cardinality {
        self.target_cardinality
    }

    pub fn declaring_file(&self) -> &Path {
        &self.declaring_file
    }

    /// Returns `true` if either endpoint is `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.source_id == id || self.target_id == id
    }
}

/// The result of one scan.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    nodes: IndexMap<String, ModelNode>,
    relationships: Vec<Relationship>,
    warnings: Vec<String>,
    fatal_error: Option<String>,
}

impl Graph {
    /// Builds a graph from already-assembled parts.
    ///
    /// Nodes are keyed by id; a later node with the same id replaces an
    /// earlier one. Any relationship endpoint without a node gets a
    /// placeholder so the graph stays connected.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = ModelNode>,
        relationships: Vec<Relationship>,
        warnings: Vec<String>,
    ) -> Self {
        let mut nodes: IndexMap<String, ModelNode> = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();

        for relationship in &relationships {
            for id in [relationship.source_id(), relationship.target_id()] {
                if !nodes.contains_key(id) {
                    nodes.insert(id.to_string(), ModelNode::placeholder(id));
                }
            }
        }

        Self {
            nodes,
            relationships,
            warnings,
            fatal_error: None,
        }
    }

    /// An empty graph carrying a top-level error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            fatal_error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &ModelNode> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&ModelNode> {
        self.nodes.get(identifier::normalize(id))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(identifier::normalize(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Relationships in discovery order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Non-fatal diagnostics, one per affected file or directory.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The top-level error, if the scan could not run at all.
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal_error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Relationships with `id` as either endpoint.
    pub fn relationships_touching<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.iter().filter(move |rel| rel.touches(id))
    }
}
