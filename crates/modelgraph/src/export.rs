//! Presentation exporters for scanned graphs.
//!
//! - [`svg::SvgExporter`] renders a computed [`Layout`](crate::layout::Layout)
//!   honouring a search filter.
//! - [`text::TextReport`] formats a [`Graph`](modelgraph_core::model::Graph)
//!   as a plain-text listing.

pub mod svg;
pub mod text;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Style error: {0}")]
    Style(String),

    #[error("Render error: {0}")]
    Render(String),
}
