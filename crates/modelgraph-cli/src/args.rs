//! Command-line argument definitions for the modelgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the workspace, the output format and
//! destination, configuration file, search filter, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the modelgraph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Workspace root to scan
    #[arg(help = "Workspace root to scan (defaults to the current directory)")]
    pub root: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file, standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only draw models matching this query and their neighbours (SVG only)
    #[arg(long)]
    pub filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Rendering of the scanned graph.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text listing of models and relationships
    Text,
    /// The graph serialized as JSON
    Json,
    /// Laid-out diagram
    Svg,
}
