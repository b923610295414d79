//! Degree-aware placement followed by collision resolution.
//!
//! Graphs with at most `grid_threshold` nodes are laid out as a cluster: the
//! highest-degree node sits at the centre, the remaining connected nodes on a
//! ring around it, and isolated nodes in a grid band below. Larger graphs
//! drop the cluster model and fill a `ceil(sqrt(n))`-column grid.

use std::{collections::HashMap, f32::consts::PI};

use indexmap::IndexMap;
use log::{debug, info};

use modelgraph_core::{
    geometry::{Bounds, Point, Size},
    model::{Graph, ModelNode},
};

use super::{
    Layout, Placement, PositionedNode,
    collision::{self, Body},
    edges,
};
use crate::{config::LayoutConfig, structure::GraphIndex};

/// Layout engine for model graphs.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: LayoutConfig,
}

impl Engine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Box size of a node, sized to its simple name.
    pub fn node_size(&self, node: &ModelNode) -> Size {
        let chars = node.simple_name().chars().count() as f32;
        let width = (chars * self.config.char_width() + 2.0 * self.config.node_padding())
            .min(self.config.max_node_width())
            .max(self.config.min_node_width());
        Size::new(width, self.config.node_height())
    }

    /// Initial placement only, without collision resolution.
    pub fn place(&self, graph: &Graph) -> Layout {
        let index = GraphIndex::new(graph);
        let sizes: HashMap<&str, Size> = graph
            .nodes()
            .map(|node| (node.id(), self.node_size(node)))
            .collect();

        let mut order: Vec<&ModelNode> = graph.nodes().collect();
        order.sort_by(|a, b| {
            index
                .degree(b.id())
                .cmp(&index.degree(a.id()))
                .then_with(|| a.id().cmp(b.id()))
        });

        let (positions, placement) = if graph.node_count() > self.config.grid_threshold() {
            self.place_grid(&order, &sizes)
        } else {
            let (connected, isolated): (Vec<_>, Vec<_>) = order
                .into_iter()
                .partition(|node| index.degree(node.id()) > 0);
            self.place_cluster(&connected, &isolated, &sizes)
        };

        let nodes: IndexMap<String, PositionedNode> = graph
            .nodes()
            .map(|node| {
                let position = positions.get(node.id()).copied().unwrap_or_default();
                let positioned = PositionedNode::new(node.id(), position, sizes[node.id()]);
                (node.id().to_string(), positioned)
            })
            .collect();

        let mut layout = Layout {
            nodes,
            edges: edges::merge_relationships(graph.relationships()),
            canvas: Bounds::default(),
            placement,
            relaxation: collision::Relaxation::default(),
        };
        layout.canvas = self.canvas(&layout);
        layout
    }

    /// Full layout: placement, pinned positions, then collision resolution.
    ///
    /// Pinned positions for ids not in `graph` are ignored.
    pub fn calculate(&self, graph: &Graph, pinned: &HashMap<String, Point>) -> Layout {
        info!(nodes = graph.node_count(), pinned = pinned.len(); "Calculating layout");
        let mut layout = self.place(graph);

        for (id, position) in pinned {
            if let Some(node) = layout.nodes.get_mut(id) {
                node.position = *position;
                node.pinned = true;
            }
        }

        let mut bodies: Vec<Body> = layout
            .nodes
            .values()
            .map(|node| Body::new(node.position, node.size).with_pinned(node.pinned))
            .collect();
        let max_passes = self.config.pass_budget(graph.node_count());
        layout.relaxation = collision::resolve(&mut bodies, self.config.spacing(), max_passes);

        for (node, body) in layout.nodes.values_mut().zip(&bodies) {
            node.position = body.center();
        }
        layout.canvas = self.canvas(&layout);

        info!(
            passes = layout.relaxation.passes(),
            converged = layout.relaxation.converged();
            "Layout calculated"
        );
        layout
    }

    fn place_cluster(
        &self,
        connected: &[&ModelNode],
        isolated: &[&ModelNode],
        sizes: &HashMap<&str, Size>,
    ) -> (HashMap<String, Point>, Placement) {
        let viewport = self.config.viewport();
        let margin = self.config.margin();
        let spacing = self.config.spacing();
        let node_height = self.config.node_height();
        let mut positions = HashMap::new();

        let max_width = widest(connected, sizes);
        let cell = Size::new(max_width + spacing, node_height + spacing);
        let cell_diagonal = Point::new(cell.width(), cell.height()).hypot();

        let ring_len = connected.len().saturating_sub(1);
        let radius = match ring_len {
            0 => 0.0,
            1 => cell_diagonal.max(self.config.min_ring_radius()),
            n => {
                let chord = cell_diagonal / (2.0 * (PI / n as f32).sin());
                chord.max(cell_diagonal).max(self.config.min_ring_radius())
            }
        };

        let center = Point::new(
            (viewport.width() / 2.0).max(margin + radius + max_width / 2.0),
            (viewport.height() / 2.0).max(margin + radius + node_height / 2.0),
        );

        if let Some((hub, ring)) = connected.split_first() {
            positions.insert(hub.id().to_string(), center);
            for (k, node) in ring.iter().enumerate() {
                let angle = -PI / 2.0 + 2.0 * PI * k as f32 / ring_len as f32;
                let offset = Point::new(angle.cos(), angle.sin()).scale(radius);
                positions.insert(node.id().to_string(), center.add_point(offset));
            }
        }

        let cluster_bottom = if connected.is_empty() {
            margin - self.config.band_gap()
        } else {
            center.y() + radius + node_height / 2.0
        };

        let isolated_band = (!isolated.is_empty()).then(|| {
            let band_cell = Size::new(widest(isolated, sizes) + spacing, cell.height());
            let usable = (viewport.width() - 2.0 * margin + spacing).max(band_cell.width());
            let columns = ((usable / band_cell.width()).floor() as usize)
                .clamp(1, isolated.len());
            let rows = isolated.len().div_ceil(columns);

            let band_size = Size::new(
                columns as f32 * band_cell.width() - spacing,
                rows as f32 * band_cell.height() - spacing,
            );
            let top = (cluster_bottom + self.config.band_gap())
                .max(viewport.height() - margin - band_size.height());
            let left = margin.max((viewport.width() - band_size.width()) / 2.0);

            for (i, node) in isolated.iter().enumerate() {
                let (row, column) = (i / columns, i % columns);
                let position = Point::new(
                    left + column as f32 * band_cell.width() + (band_cell.width() - spacing) / 2.0,
                    top + row as f32 * band_cell.height() + node_height / 2.0,
                );
                positions.insert(node.id().to_string(), position);
            }

            debug!(columns, rows, top; "Isolated nodes placed in band");
            Bounds::new_from_top_left(Point::new(left, top), band_size)
        });

        debug!(connected = connected.len(), radius; "Cluster placed");
        (
            positions,
            Placement::Cluster {
                center,
                radius,
                isolated_band,
            },
        )
    }

    fn place_grid(
        &self,
        order: &[&ModelNode],
        sizes: &HashMap<&str, Size>,
    ) -> (HashMap<String, Point>, Placement) {
        let margin = self.config.margin();
        let spacing = self.config.spacing();
        let columns = (order.len() as f32).sqrt().ceil().max(1.0) as usize;
        let cell = Size::new(
            widest(order, sizes) + spacing,
            self.config.node_height() + spacing,
        );

        let positions = order
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let (row, column) = (i / columns, i % columns);
                let position = Point::new(
                    margin + column as f32 * cell.width() + (cell.width() - spacing) / 2.0,
                    margin + row as f32 * cell.height() + (cell.height() - spacing) / 2.0,
                );
                (node.id().to_string(), position)
            })
            .collect();

        debug!(nodes = order.len(), columns; "Grid placed");
        (positions, Placement::Grid { columns })
    }

    /// Viewport extent grown to cover every node plus the margin.
    fn canvas(&self, layout: &Layout) -> Bounds {
        let viewport = Bounds::new_from_top_left(Point::default(), self.config.viewport());
        let margin = self.config.margin();

        layout
            .nodes
            .values()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .map_or(viewport, |content| {
                let padded = Bounds::new_from_top_left(
                    Point::new(content.min_x() - margin, content.min_y() - margin),
                    Size::new(content.width() + 2.0 * margin, content.height() + 2.0 * margin),
                );
                viewport.merge(&padded)
            })
    }
}

fn widest(nodes: &[&ModelNode], sizes: &HashMap<&str, Size>) -> f32 {
    nodes
        .iter()
        .filter_map(|node| sizes.get(node.id()))
        .map(|size| size.width())
        .fold(0.0, f32::max)
}
