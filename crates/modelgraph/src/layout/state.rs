//! Layout lifecycle across scans and user drags.

use std::collections::HashMap;

use log::debug;

use modelgraph_core::{geometry::Point, model::Graph};

use super::{Engine, Layout, Viewport};

/// Where a render cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutPhase {
    /// Nodes exist but nothing has been placed yet.
    #[default]
    Unlaid,
    /// Every node has an engine-derived position.
    Laid,
    /// Some positions were overridden by drags.
    UserAdjusted,
    /// A fresh graph was laid out, keeping drags of surviving nodes.
    Relaid,
}

/// Presentation-side layout state: the current layout, sticky drag
/// positions keyed by node id, and the viewport.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    phase: LayoutPhase,
    pinned: HashMap<String, Point>,
    layout: Option<Layout>,
    viewport: Viewport,
}

impl LayoutState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Drag positions that will be kept by the next re-layout.
    pub fn pinned(&self) -> &HashMap<String, Point> {
        &self.pinned
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Lays out `graph`. Drag positions of nodes missing from `graph` are
    /// discarded, the others are kept in place.
    pub fn apply(&mut self, engine: &Engine, graph: &Graph) -> &Layout {
        let before = self.pinned.len();
        self.pinned.retain(|id, _| graph.contains_node(id));
        if self.pinned.len() != before {
            debug!(discarded = before - self.pinned.len(); "Dropped drag positions of removed nodes");
        }

        self.phase = match self.phase {
            LayoutPhase::Unlaid => LayoutPhase::Laid,
            _ => LayoutPhase::Relaid,
        };
        self.layout.insert(engine.calculate(graph, &self.pinned))
    }

    /// Records a drag of node `id` to `position`.
    ///
    /// Returns `false`, changing nothing, when no layout is present or the
    /// node is not part of it.
    pub fn drag(&mut self, id: &str, position: Point) -> bool {
        let Some(layout) = self.layout.as_mut() else {
            return false;
        };
        if !layout.set_position(id, position) {
            return false;
        }

        self.pinned.insert(id.to_string(), position);
        self.phase = LayoutPhase::UserAdjusted;
        true
    }

    /// Forgets layout, drags and viewport changes.
    pub fn reset(&mut self) {
        self.phase = LayoutPhase::Unlaid;
        self.pinned.clear();
        self.layout = None;
        self.viewport.reset();
    }
}
