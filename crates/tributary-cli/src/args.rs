//! Command-line argument definitions for the Tributary CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, placement files,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Tributary layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (JSON)
    #[arg(help = "Path to the input graph file")]
    pub input: String,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to a placement file (JSON) applied before layout
    #[arg(short, long)]
    pub placements: Option<String>,

    /// Path to write the pinned placements back to after layout
    #[arg(long)]
    pub pins_out: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
