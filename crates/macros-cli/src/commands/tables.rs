//! Object table commands: suffixes, metadata fields, metadata sub-objects,
//! and TSV columns.
//!
//! Field requirements are passed as JSON mappings from field name to a
//! requirement level or a `[level, note]` pair, either inline or as
//! `@FILE`.

use super::common::{Globals, parse_json_arg, print_output};
use crate::formatters::MacroOutput;
use anyhow::Result;
use bids_macros_core::PagePath;
use bids_macros_core::cli::{ExitCode, OutputFormat};
use bids_macros_render::{FieldInfo, MacroProvider};
use tracing::info;

/// Renders the suffix table.
///
/// # Errors
///
/// Returns an error if a suffix is not in the schema.
pub fn render_suffix_table<S: AsRef<str>>(
    provider: &MacroProvider,
    suffixes: &[S],
    page: &PagePath,
) -> Result<MacroOutput> {
    let output = provider.make_suffix_table(suffixes, page)?;
    Ok(MacroOutput::new("make_suffix_table", output))
}

/// Renders the metadata table for a JSON field-info argument.
///
/// # Errors
///
/// Returns an error if the argument is invalid or names an unknown field.
pub fn render_metadata_table(
    provider: &MacroProvider,
    field_info: &str,
    page: &PagePath,
) -> Result<MacroOutput> {
    let field_info: FieldInfo = parse_json_arg(field_info, "field info")?;
    let output = provider.make_metadata_table(&field_info, page)?;
    Ok(MacroOutput::new("make_metadata_table", output))
}

/// Renders the table of the fields of the object at `object_path`.
///
/// # Errors
///
/// Returns an error if the argument is invalid, the object is unknown, or
/// the object has no fields.
pub fn render_subobject_table(
    provider: &MacroProvider,
    object_path: &str,
    field_info: &str,
    page: &PagePath,
) -> Result<MacroOutput> {
    let field_info: FieldInfo = parse_json_arg(field_info, "field info")?;
    let output = provider.make_subobject_table(object_path, &field_info, page)?;
    Ok(MacroOutput::new("make_subobject_table", output))
}

/// Renders the columns table for a JSON column-info argument.
///
/// # Errors
///
/// Returns an error if the argument is invalid or names an unknown column.
pub fn render_columns_table(
    provider: &MacroProvider,
    column_info: &str,
    page: &PagePath,
) -> Result<MacroOutput> {
    let column_info: FieldInfo = parse_json_arg(column_info, "column info")?;
    let output = provider.make_columns_table(&column_info, page)?;
    Ok(MacroOutput::new("make_columns_table", output))
}

/// Runs the suffix-table command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or a suffix is unknown.
pub fn run_suffix_table(
    globals: &Globals,
    suffixes: &[String],
    page: &PagePath,
    format: OutputFormat,
) -> Result<ExitCode> {
    info!("Rendering suffix table for {} suffixes", suffixes.len());
    let provider = globals.provider()?;
    print_output(&render_suffix_table(&provider, suffixes, page)?, format)
}

/// Runs the metadata-table command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the fields are invalid.
pub fn run_metadata_table(
    globals: &Globals,
    field_info: &str,
    page: &PagePath,
    format: OutputFormat,
) -> Result<ExitCode> {
    let provider = globals.provider()?;
    print_output(&render_metadata_table(&provider, field_info, page)?, format)
}

/// Runs the subobject-table command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the fields are invalid.
pub fn run_subobject_table(
    globals: &Globals,
    object_path: &str,
    field_info: &str,
    page: &PagePath,
    format: OutputFormat,
) -> Result<ExitCode> {
    info!("Rendering sub-object table for {object_path}");
    let provider = globals.provider()?;
    print_output(
        &render_subobject_table(&provider, object_path, field_info, page)?,
        format,
    )
}

/// Runs the columns-table command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the columns are invalid.
pub fn run_columns_table(
    globals: &Globals,
    column_info: &str,
    page: &PagePath,
    format: OutputFormat,
) -> Result<ExitCode> {
    let provider = globals.provider()?;
    print_output(&render_columns_table(&provider, column_info, page)?, format)
}
