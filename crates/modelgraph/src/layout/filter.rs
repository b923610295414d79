//! Search filter over a graph.
//!
//! A node matches when its simple name, its namespace, or the label or
//! helper name of any relationship touching it contains the query,
//! case-insensitively. Matches and their first-degree neighbours are
//! visible; everything else is hidden but kept.

use std::collections::HashSet;

use log::debug;

use modelgraph_core::model::Graph;

use crate::structure::GraphIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    /// `None` when no filter is active.
    visible: Option<HashSet<String>>,
    matched: HashSet<String>,
}

impl Visibility {
    /// Everything visible, nothing highlighted.
    pub fn all() -> Self {
        Self {
            visible: None,
            matched: HashSet::new(),
        }
    }

    /// Computes visibility for `query`. Blank queries show everything.
    pub fn compute(graph: &Graph, query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Self::all();
        }

        let index = GraphIndex::new(graph);
        let contains = |text: &str| text.to_lowercase().contains(&needle);

        let matched: HashSet<String> = graph
            .nodes()
            .filter(|node| {
                contains(node.simple_name())
                    || contains(node.namespace())
                    || graph.relationships_touching(node.id()).any(|relationship| {
                        contains(relationship.label())
                            || contains(relationship.kind().helper_name())
                    })
            })
            .map(|node| node.id().to_string())
            .collect();

        let mut visible = matched.clone();
        for id in &matched {
            visible.extend(index.neighbors(id).into_iter().map(str::to_string));
        }

        debug!(query, matched = matched.len(), visible = visible.len(); "Filter applied");
        Self {
            visible: Some(visible),
            matched,
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.visible.is_some()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible
            .as_ref()
            .is_none_or(|visible| visible.contains(id))
    }

    /// Whether `id` matched the query itself rather than being a neighbour.
    pub fn is_match(&self, id: &str) -> bool {
        self.matched.contains(id)
    }

    /// An edge is drawn only when both endpoints are visible.
    pub fn edge_visible(&self, source_id: &str, target_id: &str) -> bool {
        self.is_visible(source_id) && self.is_visible(target_id)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::all()
    }
}
