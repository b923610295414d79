//! Configuration types for scanning, layout and rendering.
//!
//! Every section implements [`serde::Deserialize`] and is fully defaulted, so a
//! configuration file only needs to name the values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ScanConfig`] - Which files the source locator yields and how large they may be.
//! - [`LayoutConfig`] - Node sizing, placement and relaxation parameters.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use modelgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.scan().extension(), "php");
//! assert!(config.style().background_color().is_ok());
//! ```

use std::str::FromStr;

use color::DynamicColor;
use serde::Deserialize;

use modelgraph_core::geometry::Size;
use modelgraph_parser::DEFAULT_MAX_SOURCE_LEN;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scan configuration section.
    #[serde(default)]
    scan: ScanConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(scan: ScanConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            scan,
            layout,
            style,
        }
    }

    /// Returns the scan configuration.
    pub fn scan(&self) -> &ScanConfig {
        &self.scan
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Source locator and analyzer limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension (without the dot) of candidate source files.
    extension: String,

    /// Directory names skipped in addition to the built-in set.
    excluded_dirs: Vec<String>,

    /// Files larger than this are reported as a warning instead of analysed.
    max_file_bytes: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "php".to_string(),
            excluded_dirs: Vec::new(),
            max_file_bytes: DEFAULT_MAX_SOURCE_LEN,
        }
    }
}

impl ScanConfig {
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn excluded_dirs(&self) -> &[String] {
        &self.excluded_dirs
    }

    pub fn max_file_bytes(&self) -> usize {
        self.max_file_bytes
    }

    /// Sets the candidate file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Adds directory names to skip.
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: usize) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }
}

/// Layout engine parameters.
///
/// All distances are in logical canvas units. Node positions produced by the
/// engine are box centres.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    viewport_width: f32,
    viewport_height: f32,
    node_height: f32,
    min_node_width: f32,
    max_node_width: f32,
    char_width: f32,
    node_padding: f32,
    /// Gap kept between node boxes by collision resolution.
    spacing: f32,
    margin: f32,
    /// Graphs with more nodes than this are laid out on a uniform grid.
    grid_threshold: usize,
    max_passes: usize,
    large_graph_passes: usize,
    large_graph_threshold: usize,
    min_ring_radius: f32,
    band_gap: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1200.0,
            viewport_height: 800.0,
            node_height: 44.0,
            min_node_width: 120.0,
            max_node_width: 260.0,
            char_width: 8.0,
            node_padding: 16.0,
            spacing: 20.0,
            margin: 40.0,
            grid_threshold: 40,
            max_passes: 80,
            large_graph_passes: 15,
            large_graph_threshold: 150,
            min_ring_radius: 200.0,
            band_gap: 60.0,
            min_zoom: 0.1,
            max_zoom: 4.0,
        }
    }
}

impl LayoutConfig {
    /// Size of the visible viewport the initial placement centres on.
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn min_node_width(&self) -> f32 {
        self.min_node_width
    }

    pub fn max_node_width(&self) -> f32 {
        self.max_node_width
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn node_padding(&self) -> f32 {
        self.node_padding
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn grid_threshold(&self) -> usize {
        self.grid_threshold
    }

    /// Relaxation pass budget for a graph of `node_count` nodes.
    pub fn pass_budget(&self, node_count: usize) -> usize {
        if node_count > self.large_graph_threshold {
            self.large_graph_passes
        } else {
            self.max_passes
        }
    }

    pub fn min_ring_radius(&self) -> f32 {
        self.min_ring_radius
    }

    pub fn band_gap(&self) -> f32 {
        self.band_gap
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport_width = viewport.width();
        self.viewport_height = viewport.height();
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_grid_threshold(mut self, grid_threshold: usize) -> Self {
        self.grid_threshold = grid_threshold;
        self
    }

    /// Sets the relaxation budget: `max_passes` normally, `large_graph_passes`
    /// above `large_graph_threshold` nodes.
    pub fn with_pass_budget(
        mut self,
        max_passes: usize,
        large_graph_passes: usize,
        large_graph_threshold: usize,
    ) -> Self {
        self.max_passes = max_passes;
        self.large_graph_passes = large_graph_passes;
        self.large_graph_threshold = large_graph_threshold;
        self
    }
}

/// Visual styling for the SVG exporter.
///
/// Colors are CSS color strings. Unset fields fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    node_color: Option<String>,
    placeholder_color: Option<String>,
    edge_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background color, or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn background_color(&self) -> Result<Option<DynamicColor>, String> {
        parse_color("background", self.background_color.as_deref())
    }

    /// Fill color of declared model nodes.
    pub fn node_color(&self) -> Result<Option<DynamicColor>, String> {
        parse_color("node", self.node_color.as_deref())
    }

    /// Fill color of placeholder nodes.
    pub fn placeholder_color(&self) -> Result<Option<DynamicColor>, String> {
        parse_color("placeholder", self.placeholder_color.as_deref())
    }

    /// Stroke color of relationship edges.
    pub fn edge_color(&self) -> Result<Option<DynamicColor>, String> {
        parse_color("edge", self.edge_color.as_deref())
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_node_color(mut self, color: impl Into<String>) -> Self {
        self.node_color = Some(color.into());
        self
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<DynamicColor>, String> {
    value
        .map(DynamicColor::from_str)
        .transpose()
        .map_err(|err| format!("Invalid {field} color in config: {err}"))
}
