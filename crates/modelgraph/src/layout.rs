//! Layout of model graphs.
//!
//! [`Engine`] turns a [`Graph`](modelgraph_core::model::Graph) into a
//! [`Layout`]: one positioned box per node, merged edges, and the logical
//! canvas extent consumed by [`Viewport`]. [`LayoutState`] tracks user drags
//! across re-layouts and [`Visibility`] implements the search filter.

pub mod collision;
pub mod edges;
pub mod engine;
pub mod filter;
pub mod state;
pub mod viewport;

use std::collections::HashMap;

use indexmap::IndexMap;

use modelgraph_core::geometry::{Bounds, Point, Size};

pub use collision::Relaxation;
pub use edges::MergedEdge;
pub use engine::Engine;
pub use filter::Visibility;
pub use state::{LayoutPhase, LayoutState};
pub use viewport::Viewport;

/// A node box placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: String,
    position: Point,
    size: Size,
    pinned: bool,
}

impl PositionedNode {
    fn new(id: &str, position: Point, size: Size) -> Self {
        Self {
            id: id.to_string(),
            position,
            size,
            pinned: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Centre of the box.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether the position came from a user drag.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }
}

/// How the initial positions were derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Highest-degree node at `center`, other connected nodes on a ring of
    /// `radius`, isolated nodes inside `isolated_band` when there are any.
    Cluster {
        center: Point,
        radius: f32,
        isolated_band: Option<Bounds>,
    },
    /// Uniform grid used for large graphs.
    Grid { columns: usize },
}

/// Result of a layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    nodes: IndexMap<String, PositionedNode>,
    edges: Vec<MergedEdge>,
    canvas: Bounds,
    placement: Placement,
    relaxation: Relaxation,
}

impl Layout {
    /// Positioned nodes in graph order.
    pub fn nodes(&self) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.get(id)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.nodes.get(id).map(PositionedNode::position)
    }

    /// All positions keyed by node id.
    pub fn positions(&self) -> HashMap<String, Point> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.position))
            .collect()
    }

    pub fn edges(&self) -> &[MergedEdge] {
        &self.edges
    }

    /// Logical canvas extent: the viewport grown to cover every node plus
    /// the margin.
    pub fn canvas(&self) -> Bounds {
        self.canvas
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn relaxation(&self) -> Relaxation {
        self.relaxation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves a node, marking it pinned. Returns `false` for unknown ids.
    pub fn set_position(&mut self, id: &str, position: Point) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                node.pinned = true;
                true
            }
            None => false,
        }
    }
}
