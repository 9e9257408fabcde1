//! Output formatters for CLI commands.
//!
//! Markdown mode prints the snippet exactly as a page would receive it.
//! JSON mode wraps it in an envelope naming the macro that produced it.

use anyhow::Result;
use bids_macros_core::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;

/// Output of one macro run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroOutput {
    /// Macro name as written in pages (`make_suffix_table`).
    #[serde(rename = "macro")]
    pub macro_name: String,
    /// Rendered Markdown.
    pub output: String,
}

impl MacroOutput {
    /// Creates an output record.
    #[must_use]
    pub fn new(macro_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            macro_name: macro_name.into(),
            output: output.into(),
        }
    }
}

/// Formats a macro output according to the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use bids_macros_cli::formatters::{MacroOutput, format_output};
/// use bids_macros_core::cli::OutputFormat;
///
/// let out = MacroOutput::new("make_filetree_example", "└── README");
/// assert_eq!(format_output(&out, OutputFormat::Markdown)?, "└── README");
///
/// let json = format_output(&out, OutputFormat::Json)?;
/// assert!(json.contains("\"macro\": \"make_filetree_example\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output(output: &MacroOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(output.output.clone()),
        OutputFormat::Json => json::format(output),
    }
}

/// Formats an error for the terminal.
///
/// The error chain is printed outermost first, one cause per line.
#[must_use]
pub fn format_error(error: &anyhow::Error) -> String {
    let mut text = format!("{} {error}", "error:".red().bold());
    for cause in error.chain().skip(1) {
        text.push_str(&format!("\n  {} {cause}", "caused by:".yellow()));
    }
    text
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }
}
