//! Tributary CLI library
//!
//! This module contains the core CLI logic for the Tributary layout tool.

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use tributary::{
    Graph, GraphInput, TributaryError,
    place::{PlacementMap, apply_placements, pinned_placements},
    snapshot::LayoutSnapshot,
};

/// Run the Tributary CLI application
///
/// Reads the input graph, applies any scripted placements, runs the
/// layout engine, and writes the resulting layout snapshot to the output
/// file. When requested, the pinned placements are written back out so a
/// later run can reproduce the arrangement.
///
/// # Errors
///
/// Returns `TributaryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input or placement files
/// - Placements naming unknown nodes
pub fn run(args: &Args) -> Result<(), TributaryError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let input: GraphInput =
        serde_json::from_str(&source).map_err(|e| TributaryError::Decode(e.to_string()))?;
    let mut graph = Graph::from_input(input)?;

    if let Some(path) = &args.placements {
        let raw = fs::read_to_string(path)?;
        let placements: PlacementMap =
            serde_json::from_str(&raw).map_err(|e| TributaryError::Decode(e.to_string()))?;
        apply_placements(&mut graph, &placements)?;
    }

    let engine = app_config.layout.engine();
    let report = engine.run(&mut graph);
    info!(
        crossings = report.crossings(),
        sweeps = report.sweeps();
        "Layout computed"
    );

    let snapshot = LayoutSnapshot::capture(&graph);
    let rendered = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| TributaryError::Decode(e.to_string()))?;
    fs::write(&args.output, rendered)?;

    if let Some(path) = &args.pins_out {
        let pins = pinned_placements(&graph);
        let rendered =
            serde_json::to_string_pretty(&pins).map_err(|e| TributaryError::Decode(e.to_string()))?;
        fs::write(path, rendered)?;
        info!(pins_path = path; "Pinned placements written");
    }

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
