//! Rule-driven commands: filename templates, entity tables, and entity
//! definitions.

use super::common::{Globals, print_output};
use crate::formatters::MacroOutput;
use anyhow::Result;
use bids_macros_core::SchemaFilter;
use bids_macros_core::cli::{ExitCode, OutputFormat};
use bids_macros_render::MacroProvider;
use tracing::info;

/// Renders the filename template of the rules matching `filter`.
///
/// # Errors
///
/// Returns an error if a filter value is not in the schema.
pub fn render_filename_template(
    provider: &MacroProvider,
    filter: &SchemaFilter,
) -> Result<MacroOutput> {
    let output = provider.make_filename_template(filter)?;
    Ok(MacroOutput::new("make_filename_template", output))
}

/// Renders the entity table of the rules matching `filter`.
///
/// # Errors
///
/// Returns an error if a filter value is not in the schema.
pub fn render_entity_table(provider: &MacroProvider, filter: &SchemaFilter) -> Result<MacroOutput> {
    let output = provider.make_entity_table(filter)?;
    Ok(MacroOutput::new("make_entity_table", output))
}

/// Renders the entity definitions.
///
/// # Errors
///
/// Returns an error if the schema names an entity it does not define.
pub fn render_entity_definitions(provider: &MacroProvider) -> Result<MacroOutput> {
    let output = provider.make_entity_definitions()?;
    Ok(MacroOutput::new("make_entity_definitions", output))
}

/// Runs the filename-template command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the filter is invalid.
pub fn run_filename_template(
    globals: &Globals,
    filter: SchemaFilter,
    format: OutputFormat,
) -> Result<ExitCode> {
    info!("Rendering filename template for {filter:?}");
    let provider = globals.provider()?;
    print_output(&render_filename_template(&provider, &filter)?, format)
}

/// Runs the entity-table command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the filter is invalid.
pub fn run_entity_table(
    globals: &Globals,
    filter: SchemaFilter,
    format: OutputFormat,
) -> Result<ExitCode> {
    info!("Rendering entity table for {filter:?}");
    let provider = globals.provider()?;
    print_output(&render_entity_table(&provider, &filter)?, format)
}

/// Runs the entity-definitions command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded.
pub fn run_entity_definitions(globals: &Globals, format: OutputFormat) -> Result<ExitCode> {
    let provider = globals.provider()?;
    print_output(&render_entity_definitions(&provider)?, format)
}
