//! Glossary command.

use super::common::{Globals, print_output};
use crate::formatters::MacroOutput;
use anyhow::Result;
use bids_macros_core::PagePath;
use bids_macros_core::cli::{ExitCode, OutputFormat};
use bids_macros_render::MacroProvider;
use tracing::info;

/// Renders the glossary for `page`.
///
/// # Errors
///
/// Returns an error if the glossary template fails to render.
pub fn render(provider: &MacroProvider, page: &PagePath) -> Result<MacroOutput> {
    let output = provider.make_glossary(page)?;
    Ok(MacroOutput::new("make_glossary", output))
}

/// Runs the glossary command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded.
pub fn run(globals: &Globals, page: &PagePath, format: OutputFormat) -> Result<ExitCode> {
    info!("Rendering glossary for {page}");
    let provider = globals.provider()?;
    print_output(&render(&provider, page)?, format)
}
