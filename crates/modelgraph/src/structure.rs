//! Adjacency index over a [`Graph`].
//!
//! [`GraphIndex`] borrows a graph and tracks incoming and outgoing
//! relationship indices per node, which is what placement (degree ordering)
//! and filtering (first-degree neighbours) need.

use std::collections::HashMap;

use modelgraph_core::model::{Graph, ModelNode, Relationship};

/// Index of relationships by endpoint.
///
/// Self-relationships count twice towards a node's degree, once per
/// endpoint.
#[derive(Debug)]
pub struct GraphIndex<'a> {
    graph: &'a Graph,
    income_edges: HashMap<&'a str, Vec<usize>>,
    outgoing_edges: HashMap<&'a str, Vec<usize>>,
}

impl<'a> GraphIndex<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let mut income_edges: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut outgoing_edges: HashMap<&str, Vec<usize>> = HashMap::new();

        for (index, relationship) in graph.relationships().iter().enumerate() {
            outgoing_edges
                .entry(relationship.source_id())
                .or_default()
                .push(index);
            income_edges
                .entry(relationship.target_id())
                .or_default()
                .push(index);
        }

        Self {
            graph,
            income_edges,
            outgoing_edges,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Number of relationship endpoints touching `id`.
    pub fn degree(&self, id: &str) -> usize {
        self.income_edges.get(id).map_or(0, Vec::len)
            + self.outgoing_edges.get(id).map_or(0, Vec::len)
    }

    /// Relationships declared by `id`.
    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &'a Relationship> + '_ {
        self.edges(&self.outgoing_edges, id)
    }

    /// Relationships pointing at `id`.
    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &'a Relationship> + '_ {
        self.edges(&self.income_edges, id)
    }

    /// Distinct first-degree neighbours of `id`, excluding `id` itself.
    pub fn neighbors(&self, id: &str) -> Vec<&'a str> {
        let mut neighbors: Vec<&'a str> = Vec::new();
        let others = self
            .outgoing(id)
            .map(Relationship::target_id)
            .chain(self.incoming(id).map(Relationship::source_id));
        for other in others {
            if other != id && !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }

    /// Splits nodes into connected (degree > 0) and isolated ones, each in
    /// graph order.
    pub fn partition_by_degree(&self) -> (Vec<&'a ModelNode>, Vec<&'a ModelNode>) {
        self.graph
            .nodes()
            .partition(|node| self.degree(node.id()) > 0)
    }

    fn edges<'s>(
        &'s self,
        edges: &'s HashMap<&'a str, Vec<usize>>,
        id: &str,
    ) -> impl Iterator<Item = &'a Relationship> + 's {
        let relationships = self.graph.relationships();
        edges
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&index| &relationships[index])
    }
}
