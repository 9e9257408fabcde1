//! Filetree command.
//!
//! Draws a directory tree from a JSON directory description. The schema is
//! never read, so the command works without one.

use super::common::{Globals, parse_json, print_output, read_input};
use crate::formatters::MacroOutput;
use anyhow::Result;
use bids_macros_core::cli::{ExitCode, OutputFormat};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Renders the tree described by `text`.
///
/// `use_pipe` overrides the configured connector style: `Some(true)` for
/// box-drawing glyphs, `Some(false)` for ASCII.
///
/// # Errors
///
/// Returns an input error if `text` is not JSON or does not describe a
/// directory tree.
pub fn render(globals: &Globals, text: &str, use_pipe: Option<bool>) -> Result<MacroOutput> {
    let description: Value = parse_json(text, "directory description")?;
    let provider = globals.provider_without_schema()?;
    let output = provider.make_filetree_example(&description, use_pipe)?;
    Ok(MacroOutput::new("make_filetree_example", output))
}

/// Runs the filetree command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or rendered.
pub fn run(
    globals: &Globals,
    input: &Path,
    use_pipe: Option<bool>,
    format: OutputFormat,
) -> Result<ExitCode> {
    info!("Drawing directory tree from {}", input.display());
    let text = read_input(input)?;
    let output = render(globals, &text, use_pipe)?;
    print_output(&output, format)
}
