//! CLI logic for the Chatflow diagram tool.
//!
//! This module contains the core CLI logic: load the configuration, render
//! the chatbot flow chart and write the SVG to a file or standard output.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use chatflow::{ChatflowError, DiagramBuilder, pipeline::Pipeline};

/// Run the Chatflow CLI application
///
/// # Errors
///
/// Returns `ChatflowError` for:
/// - Configuration loading errors
/// - Layout errors
/// - Rendering errors
/// - Output I/O errors
pub fn run(args: &Args) -> Result<(), ChatflowError> {
    info!(output_path = args.output; "Rendering diagram");

    let app_config = config::load_config(args.config.as_ref())?;

    let builder = DiagramBuilder::new(app_config);
    let layout = builder.layout(&Pipeline::chatbot())?;
    let svg = builder.render_svg(&layout)?;

    if args.writes_to_stdout() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(svg.as_bytes())?;
        stdout.flush()?;
    } else {
        fs::write(&args.output, svg)?;
    }

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
