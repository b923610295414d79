//! CLI logic for the modelgraph tool.
//!
//! Scans a workspace, renders the graph in the requested format and writes
//! it to a file or standard output.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
};

use log::{info, warn};

use modelgraph::{ModelGraphBuilder, ModelGraphError, layout::Visibility};

/// Run the modelgraph CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ModelGraphError` for:
/// - Configuration loading errors
/// - A missing or unreadable workspace root
/// - Rendering errors
/// - Output I/O errors
pub fn run(args: &Args) -> Result<(), ModelGraphError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ModelGraphBuilder::new(app_config);

    let root = args
        .root
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok());
    info!(root:? = root, format:? = args.format; "Scanning workspace");

    let graph = builder.scan_strict(root.as_deref())?;
    if !graph.warnings().is_empty() {
        warn!(count = graph.warnings().len(); "Some files could not be parsed");
    }

    let rendered = match args.format {
        OutputFormat::Text => builder.render_text(&graph),
        OutputFormat::Json => serde_json::to_string_pretty(&graph).map_err(io::Error::from)?,
        OutputFormat::Svg => {
            let layout = builder.layout(&graph);
            let visibility = args
                .filter
                .as_deref()
                .map(|query| Visibility::compute(&graph, query))
                .unwrap_or_default();
            builder.render_svg(&graph, &layout, &visibility)?
        }
    };

    match &args.output {
        Some(output) => {
            fs::write(output, rendered)?;
            info!(output_file = output; "Output written successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
