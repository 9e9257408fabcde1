//! Invoke command.
//!
//! Runs a macro call written as JSON, the same shape a documentation page
//! uses:
//!
//! ```json
//! {"macro": "make_metadata_table", "field_info": {"TaskName": "REQUIRED"}}
//! ```

use super::common::{Globals, parse_json, print_output, read_input};
use crate::formatters::MacroOutput;
use anyhow::Result;
use bids_macros_core::PagePath;
use bids_macros_core::cli::{ExitCode, OutputFormat};
use bids_macros_render::MacroCall;
use std::path::Path;
use tracing::info;

/// Parses and runs a macro call.
///
/// Directory-tree calls never load the schema.
///
/// # Errors
///
/// Returns an input error if the call is malformed or needs a page that was
/// not given, otherwise the macro's own errors.
pub fn render(globals: &Globals, text: &str, page: Option<&PagePath>) -> Result<MacroOutput> {
    let call: MacroCall = parse_json(text, "macro call")?;
    info!("Invoking {}", call.name());

    let provider = if matches!(call, MacroCall::MakeFiletreeExample { .. }) {
        globals.provider_without_schema()?
    } else {
        globals.provider()?
    };

    let output = provider.invoke(&call, page)?;
    Ok(MacroOutput::new(call.name(), output))
}

/// Runs the invoke command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the call fails.
pub fn run(
    globals: &Globals,
    input: &Path,
    page: Option<&PagePath>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let text = read_input(input)?;
    print_output(&render(globals, &text, page)?, format)
}
