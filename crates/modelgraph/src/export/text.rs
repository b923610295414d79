//! Plain-text report of a scanned graph.

use std::fmt;

use modelgraph_core::model::Graph;

use crate::structure::GraphIndex;

/// Formats a graph as a listing of models, their relationships and the scan
/// warnings.
///
/// ```
/// # use modelgraph::{export::text::TextReport, Graph};
/// let report = TextReport::new(&Graph::default()).to_string();
/// assert!(report.starts_with("Models: 0"));
/// ```
pub struct TextReport<'a> {
    graph: &'a Graph,
}

impl<'a> TextReport<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = self.graph.fatal_error() {
            return writeln!(f, "Error: {error}");
        }

        let placeholders = self.graph.nodes().filter(|node| node.is_placeholder()).count();
        writeln!(
            f,
            "Models: {} ({} placeholder{})",
            self.graph.node_count(),
            placeholders,
            if placeholders == 1 { "" } else { "s" }
        )?;
        writeln!(f, "Relationships: {}", self.graph.relationships().len())?;

        let index = GraphIndex::new(self.graph);
        for node in self.graph.nodes() {
            writeln!(f)?;
            match node.display_path() {
                Some(path) => writeln!(f, "{} ({path})", node.id())?,
                None => writeln!(f, "{} (placeholder)", node.id())?,
            }
            for relationship in index.outgoing(node.id()) {
                writeln!(
                    f,
                    "  {}() {} -> {} [{}, {}:{}]",
                    relationship.method(),
                    relationship.kind(),
                    relationship.target_id(),
                    relationship.label(),
                    relationship.source_cardinality(),
                    relationship.target_cardinality(),
                )?;
            }
        }

        if !self.graph.warnings().is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for warning in self.graph.warnings() {
                writeln!(f, "  - {warning}")?;
            }
        }
        Ok(())
    }
}
