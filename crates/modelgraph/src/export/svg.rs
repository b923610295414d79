//! SVG rendering of a laid-out graph.

use log::debug;
use svg::{
    Document,
    node::element::{Circle, Group, Line, Rectangle, Text},
};

use modelgraph_core::{
    geometry::Point,
    model::{Cardinality, Graph},
};

use crate::{
    config::StyleConfig,
    export::Error,
    layout::{Layout, MergedEdge, PositionedNode, Visibility},
};

const DEFAULT_NODE_FILL: &str = "#eef3fb";
const DEFAULT_PLACEHOLDER_FILL: &str = "#f4f4f4";
const DEFAULT_EDGE_STROKE: &str = "#5b6b82";
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
const FONT_SIZE: f32 = 14.0;
const LABEL_FONT_SIZE: f32 = 11.0;
/// Fraction of an edge, from each end, where cardinality markers sit.
const MARKER_OFFSET: f32 = 0.18;

/// Renders layouts to SVG documents.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<String>,
    node_fill: String,
    placeholder_fill: String,
    edge_stroke: String,
}

impl SvgExporter {
    /// Creates an exporter using the colors configured in `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] if a configured color does not parse.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        let color_or = |color: Result<Option<color::DynamicColor>, String>, fallback: &str| {
            color
                .map(|color| color.map_or_else(|| fallback.to_string(), |c| c.to_string()))
                .map_err(Error::Style)
        };

        Ok(Self {
            background: style
                .background_color()
                .map_err(Error::Style)?
                .map(|color| color.to_string()),
            node_fill: color_or(style.node_color(), DEFAULT_NODE_FILL)?,
            placeholder_fill: color_or(style.placeholder_color(), DEFAULT_PLACEHOLDER_FILL)?,
            edge_stroke: color_or(style.edge_color(), DEFAULT_EDGE_STROKE)?,
        })
    }

    /// Builds the document. Hidden nodes and edges touching them are left
    /// out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a graph node has no position in `layout`.
    pub fn render(
        &self,
        graph: &Graph,
        layout: &Layout,
        visibility: &Visibility,
    ) -> Result<Document, Error> {
        let canvas = layout.canvas();
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    canvas.min_x(),
                    canvas.min_y(),
                    canvas.width(),
                    canvas.height()
                ),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", canvas.min_x())
                    .set("y", canvas.min_y())
                    .set("width", canvas.width())
                    .set("height", canvas.height())
                    .set("fill", background.as_str()),
            );
        }

        let mut edges = Group::new().set("class", "edges");
        for edge in layout.edges() {
            if !visibility.edge_visible(edge.source_id(), edge.target_id()) {
                continue;
            }
            let (Some(source), Some(target)) =
                (layout.node(edge.source_id()), layout.node(edge.target_id()))
            else {
                return Err(Error::Render(format!(
                    "edge `{}` - `{}` has no positioned endpoint",
                    edge.source_id(),
                    edge.target_id()
                )));
            };
            edges = edges.add(self.render_edge(edge, source, target));
        }
        doc = doc.add(edges);

        let mut nodes = Group::new().set("class", "nodes");
        for node in graph.nodes() {
            if !visibility.is_visible(node.id()) {
                continue;
            }
            let positioned = layout.node(node.id()).ok_or_else(|| {
                Error::Render(format!("node `{}` has no position", node.id()))
            })?;

            let fill = if node.is_placeholder() {
                &self.placeholder_fill
            } else {
                &self.node_fill
            };
            let bounds = positioned.bounds();
            let mut rect = Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", 6.0)
                .set("fill", fill.as_str())
                .set("stroke", self.edge_stroke.as_str())
                .set(
                    "stroke-width",
                    if visibility.is_match(node.id()) { 3.0 } else { 1.0 },
                );
            if node.is_placeholder() {
                rect = rect.set("stroke-dasharray", "5,3");
            }

            let label = Text::new(node.simple_name())
                .set("x", positioned.position().x())
                .set("y", positioned.position().y())
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", FONT_SIZE);

            nodes = nodes.add(
                Group::new()
                    .set("class", "node")
                    .set("data-id", node.id())
                    .set("data-path", node.display_path().unwrap_or_default())
                    .add(rect)
                    .add(label),
            );
        }
        doc = doc.add(nodes);

        debug!(nodes = layout.len(), edges = layout.edges().len(); "SVG document rendered");
        Ok(doc)
    }

    /// Renders straight to an SVG string.
    pub fn render_to_string(
        &self,
        graph: &Graph,
        layout: &Layout,
        visibility: &Visibility,
    ) -> Result<String, Error> {
        self.render(graph, layout, visibility)
            .map(|doc| doc.to_string())
    }

    fn render_edge(
        &self,
        edge: &MergedEdge,
        source: &PositionedNode,
        target: &PositionedNode,
    ) -> Group {
        let group = Group::new()
            .set("class", "edge")
            .set("data-source", edge.source_id())
            .set("data-target", edge.target_id())
            .set("data-methods", edge.methods().join(", "));

        if edge.is_self_loop() {
            let corner = Point::new(source.bounds().max_x(), source.bounds().min_y());
            return group
                .add(
                    Circle::new()
                        .set("cx", corner.x())
                        .set("cy", corner.y())
                        .set("r", 14.0)
                        .set("fill", "none")
                        .set("stroke", self.edge_stroke.as_str()),
                )
                .add(edge_text(
                    edge.label(),
                    corner.add_point(Point::new(0.0, -20.0)),
                    LABEL_FONT_SIZE,
                ));
        }

        let (from, to) = (source.position(), target.position());
        let along = |t: f32| from.add_point(to.sub_point(from).scale(t));

        group
            .add(
                Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y())
                    .set("stroke", self.edge_stroke.as_str())
                    .set("stroke-width", 1.5),
            )
            .add(edge_text(edge.label(), from.midpoint(to), LABEL_FONT_SIZE))
            .add(edge_text(
                marker(edge.source_cardinality()),
                along(MARKER_OFFSET),
                FONT_SIZE,
            ))
            .add(edge_text(
                marker(edge.target_cardinality()),
                along(1.0 - MARKER_OFFSET),
                FONT_SIZE,
            ))
    }
}

fn marker(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::One => "1",
        Cardinality::Many => "N",
    }
}

fn edge_text(content: &str, position: Point, font_size: f32) -> Text {
    Text::new(content)
        .set("x", position.x())
        .set("y", position.y())
        .set("text-anchor", "middle")
        .set("font-family", FONT_FAMILY)
        .set("font-size", font_size)
        .set("fill", "#333333")
}
