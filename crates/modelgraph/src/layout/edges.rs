//! Merges relationships into one visual edge per unordered node pair.

use indexmap::IndexMap;
use serde::Serialize;

use modelgraph_core::{
    identifier,
    model::{Cardinality, Relationship, cardinality_label},
};

/// One drawn edge standing for every relationship between two nodes.
///
/// The cardinality on each side is the widest seen across the merged
/// relationships and the label is derived from those two cardinalities. When
/// the sides differ the edge is oriented so that `source` is the `one` side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEdge {
    source_id: String,
    target_id: String,
    source_cardinality: Cardinality,
    target_cardinality: Cardinality,
    label: String,
    methods: Vec<String>,
}

impl MergedEdge {
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn source_cardinality(&self) -> Cardinality {
        self.source_cardinality
    }

    pub fn target_cardinality(&self) -> Cardinality {
        self.target_cardinality
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Contributing methods as `Model::method`, in discovery order.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Cardinality on the side of `id`, if `id` is an endpoint.
    pub fn cardinality_of(&self, id: &str) -> Option<Cardinality> {
        if id == self.source_id {
            Some(self.source_cardinality)
        } else if id == self.target_id {
            Some(self.target_cardinality)
        } else {
            None
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source_id == id || self.target_id == id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }
}

/// Merges `relationships` by unordered endpoint pair, keeping first-seen
/// pair order.
pub fn merge_relationships<'a>(
    relationships: impl IntoIterator<Item = &'a Relationship>,
) -> Vec<MergedEdge> {
    let mut merged: IndexMap<(String, String), MergedEdge> = IndexMap::new();

    for relationship in relationships {
        let (source, target) = (relationship.source_id(), relationship.target_id());
        let key = if source <= target {
            (source.to_string(), target.to_string())
        } else {
            (target.to_string(), source.to_string())
        };
        let method = format!(
            "{}::{}",
            identifier::simple_name(source),
            relationship.method()
        );

        let edge = merged.entry(key).or_insert_with(|| MergedEdge {
            source_id: source.to_string(),
            target_id: target.to_string(),
            source_cardinality: Cardinality::One,
            target_cardinality: Cardinality::One,
            label: String::new(),
            methods: Vec::new(),
        });

        let (near, far) = if edge.source_id == source {
            (relationship.source_cardinality(), relationship.target_cardinality())
        } else {
            (relationship.target_cardinality(), relationship.source_cardinality())
        };
        edge.source_cardinality = edge.source_cardinality.widen(near);
        edge.target_cardinality = edge.target_cardinality.widen(far);
        edge.methods.push(method);
    }

    merged
        .into_values()
        .map(|mut edge| {
            if edge.source_cardinality.is_many() && !edge.target_cardinality.is_many() {
                std::mem::swap(&mut edge.source_id, &mut edge.target_id);
                std::mem::swap(&mut edge.source_cardinality, &mut edge.target_cardinality);
            }
            edge.label = cardinality_label(edge.source_cardinality, edge.target_cardinality)
                .to_string();
            edge
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use modelgraph_core::model::RelationKind;

    use super::*;

    fn relationship(source: &str, target: &str, helper: &str, method: &str) -> Relationship {
        Relationship::new(
            source,
            target,
            RelationKind::from_helper(helper),
            method,
            Path::new("models.php"),
        )
    }

    #[test]
    fn test_belongs_to_and_has_many_merge_to_one_to_many() {
        let relationships = [
            relationship("App\\Comment", "App\\Post", "belongsTo", "post"),
            relationship("App\\Post", "App\\Comment", "hasMany", "comments"),
        ];

        let edges = merge_relationships(&relationships);

        assert_eq!(edges.len(), 1);
        let edge = &edges[0];
        assert_eq!(edge.label(), "One To Many");
        assert_eq!(edge.source_id(), "App\\Post");
        assert_eq!(edge.cardinality_of("App\\Post"), Some(Cardinality::One));
        assert_eq!(edge.cardinality_of("App\\Comment"), Some(Cardinality::Many));
        assert_eq!(edge.methods(), ["Comment::post", "Post::comments"]);
    }

    #[test]
    fn test_widest_cardinality_wins() {
        let relationships = [
            relationship("App\\User", "App\\Role", "hasOne", "primaryRole"),
            relationship("App\\User", "App\\Role", "belongsToMany", "roles"),
        ];

        let edges = merge_relationships(&relationships);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label(), "Many To Many");
        assert_eq!(edges[0].source_cardinality(), Cardinality::Many);
        assert_eq!(edges[0].target_cardinality(), Cardinality::Many);
    }

    #[test]
    fn test_single_relationship_keeps_own_semantics() {
        let relationships = [relationship("App\\Post", "App\\Image", "morphOne", "image")];

        let edges = merge_relationships(&relationships);

        assert_eq!(edges[0].label(), "One To One");
        assert_eq!(edges[0].source_id(), "App\\Post");
    }

    #[test]
    fn test_distinct_pairs_stay_separate_in_discovery_order() {
        let relationships = [
            relationship("App\\Post", "App\\Tag", "belongsToMany", "tags"),
            relationship("App\\Post", "App\\User", "belongsTo", "author"),
            relationship("App\\Tag", "App\\Post", "belongsToMany", "posts"),
        ];

        let edges = merge_relationships(&relationships);

        assert_eq!(edges.len(), 2);
        assert!(edges[0].touches("App\\Tag"));
        // belongsTo alone is many-to-one, so the one side becomes the source
        assert_eq!(edges[1].source_id(), "App\\User");
        assert_eq!(edges[1].label(), "One To Many");
    }

    #[test]
    fn test_self_loop() {
        let relationships = [relationship("App\\Category", "App\\Category", "hasMany", "children")];

        let edges = merge_relationships(&relationships);

        assert!(edges[0].is_self_loop());
    }
}
