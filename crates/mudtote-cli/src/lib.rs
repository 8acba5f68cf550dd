//! CLI logic for the Mudtote diagram exporter.
//!
//! This module reads a diagram JSON file, exports it through the host
//! command table and writes the result to disk.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::fs;

use log::info;

use mudtote::{
    DiagramExporter, MudtoteError,
    canvas::CanvasState,
    host::{CommandOutput, CommandTable, commands},
};

/// Run the Mudtote CLI application
///
/// This function validates the input file, exports it in the requested
/// format and writes the document to the output file.
///
/// # Errors
///
/// Returns `MudtoteError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid diagram JSON
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), MudtoteError> {
    let format = args.resolved_format();
    let output = args.resolved_output();
    info!(
        input_path = args.input,
        output_path = output,
        format:? = format;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let exporter = DiagramExporter::try_new(app_config)?;
    let diagram = exporter.parse_json(&source)?;

    let mut table = CommandTable::new();
    table.register(commands::EXPORT_SVG, || {
        exporter.render_svg(&diagram).map(CommandOutput::Text)
    });
    table.register(commands::EXPORT_TIKZ, || {
        exporter.render_tikz(&diagram).map(CommandOutput::Text)
    });
    table.register(commands::EXPORT_JSON, || {
        exporter.to_json(&diagram).map(CommandOutput::Text)
    });
    table.register(commands::EXPORT_CANVAS, || {
        Ok(CommandOutput::Text(
            exporter.render_canvas(&diagram, &CanvasState::default()),
        ))
    });

    let document = table
        .dispatch(format.command())?
        .into_text()
        .unwrap_or_default();

    fs::write(&output, document)?;

    info!(output_file = output; "Diagram exported successfully");

    Ok(())
}
