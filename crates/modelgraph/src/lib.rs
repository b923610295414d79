//! Modelgraph - extracts ORM model relationship graphs from PHP source trees.
//!
//! A scan walks a workspace, classifies every class that extends an ORM base
//! model, extracts the relationships its methods declare and assembles the
//! result into a [`Graph`]. The graph can then be laid out, filtered and
//! exported.

pub mod config;
pub mod export;
pub mod layout;

mod assembler;
mod error;
mod locator;
mod reader;
mod scan;
mod structure;

pub use modelgraph_core::{geometry, identifier, model};
pub use modelgraph_core::model::{Cardinality, Graph, ModelNode, RelationKind, Relationship};
pub use modelgraph_parser::{PhpAnalyzer, SourceAnalyzer};

pub use assembler::GraphAssembler;
pub use error::{ModelGraphError, ScanError};
pub use locator::{EXCLUDED_DIRS, SourceFiles, SourceLocator};
pub use reader::{FsReader, SourceReader};
pub use scan::Scanner;
pub use structure::GraphIndex;

use std::path::Path;

use log::info;

use config::AppConfig;
use export::{svg::SvgExporter, text::TextReport};
use layout::{Engine, Layout, Visibility};

/// Facade for scanning, laying out and exporting model graphs.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use modelgraph::{ModelGraphBuilder, config::AppConfig, layout::Visibility};
///
/// let builder = ModelGraphBuilder::new(AppConfig::default());
///
/// let graph = builder.scan(Some(Path::new("./my-app")));
/// for warning in graph.warnings() {
///     eprintln!("{warning}");
/// }
///
/// let layout = builder.layout(&graph);
/// let svg = builder
///     .render_svg(&graph, &layout, &Visibility::all())
///     .expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug, Default)]
pub struct ModelGraphBuilder {
    config: AppConfig,
}

impl ModelGraphBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Scans `root` into a graph.
    ///
    /// This never fails: a missing or unreadable root yields an empty graph
    /// carrying [`Graph::fatal_error`], per-file problems are listed in
    /// [`Graph::warnings`].
    pub fn scan(&self, root: Option<&Path>) -> Graph {
        Scanner::new(self.config.scan().clone()).scan(root)
    }

    /// Scans `root`, turning a fatal scan failure into an error.
    ///
    /// # Errors
    ///
    /// Returns [`ModelGraphError::Scan`] if no root was supplied or the root
    /// cannot be enumerated.
    pub fn scan_strict(&self, root: Option<&Path>) -> Result<Graph, ModelGraphError> {
        let graph = Scanner::new(self.config.scan().clone()).try_scan(root)?;
        Ok(graph)
    }

    /// Lays the graph out from scratch.
    pub fn layout(&self, graph: &Graph) -> Layout {
        Engine::new(self.config.layout().clone()).calculate(graph, &Default::default())
    }

    /// Layout engine configured from this builder's layout settings.
    pub fn engine(&self) -> Engine {
        Engine::new(self.config.layout().clone())
    }

    /// Renders a layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelGraphError::Export`] for invalid style colors or a
    /// layout that does not belong to `graph`.
    pub fn render_svg(
        &self,
        graph: &Graph,
        layout: &Layout,
        visibility: &Visibility,
    ) -> Result<String, ModelGraphError> {
        let exporter = SvgExporter::new(self.config.style())?;
        let svg = exporter.render_to_string(graph, layout, visibility)?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Renders the plain-text report of a graph.
    pub fn render_text(&self, graph: &Graph) -> String {
        TextReport::new(graph).to_string()
    }
}
