//! Common utilities shared across CLI commands.
//!
//! Resolves the configuration and schema from the global flags, reads JSON
//! arguments, and prints results.

use crate::formatters::{MacroOutput, format_output};
use anyhow::{Context as _, Result};
use bids_macros_core::cli::{ExitCode, OutputFormat};
use bids_macros_core::{Error, MacroConfig};
use bids_macros_render::MacroProvider;
use bids_macros_schema::Schema;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every command, taken from the global flags.
#[derive(Debug, Clone)]
pub struct Globals {
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
    /// Schema override.
    pub schema_path: Option<PathBuf>,
    /// Directory that relative paths are resolved against.
    pub working_dir: PathBuf,
}

impl Globals {
    /// Creates the settings for `working_dir`.
    #[must_use]
    pub const fn new(
        config_path: Option<PathBuf>,
        schema_path: Option<PathBuf>,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            config_path,
            schema_path,
            working_dir,
        }
    }

    /// Loads the configuration and applies the schema override.
    ///
    /// Relative paths are taken from the working directory. A relative
    /// `schema_path` inside an explicit configuration file is resolved
    /// against the directory holding that file.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but is invalid.
    pub fn config(&self) -> Result<MacroConfig> {
        let explicit = self.config_path.as_ref().map(|path| self.working_dir.join(path));
        let mut config = MacroConfig::discover(explicit.as_deref(), &self.working_dir)
            .context("failed to load configuration")?;

        let base = explicit
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.working_dir)
            .to_path_buf();

        config.schema_path = match &self.schema_path {
            Some(schema) => self.working_dir.join(schema),
            None => config.resolved_schema_path(&base),
        };

        debug!("Using schema {}", config.schema_path.display());
        Ok(config)
    }

    /// Builds a provider with the configured schema loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the schema cannot be loaded.
    pub fn provider(&self) -> Result<MacroProvider> {
        let config = self.config()?;
        let path = config.schema_path.clone();
        MacroProvider::new(config)
            .with_context(|| format!("failed to load schema from {}", path.display()))
    }

    /// Builds a provider for macros that never read the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn provider_without_schema(&self) -> Result<MacroProvider> {
        let config = self.config()?;
        Ok(MacroProvider::with_schema(Schema::default(), config)?)
    }
}

/// Reads a file, or stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path).map_err(|source| {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Parses JSON text into `T`.
///
/// Parse failures are input errors so that the CLI exits with the
/// invalid-input code.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` describing where parsing failed.
pub fn parse_json<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|e| Error::InvalidArgument(format!("invalid {what}: {e}")).into())
}

/// Parses an argument that is either inline JSON or `@FILE`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is invalid.
pub fn parse_json_arg<T: DeserializeOwned>(arg: &str, what: &str) -> Result<T> {
    match arg.strip_prefix('@') {
        Some(path) => parse_json(&read_input(Path::new(path))?, what),
        None => parse_json(arg, what),
    }
}

/// Prints a macro output to stdout.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn print_output(output: &MacroOutput, format: OutputFormat) -> Result<ExitCode> {
    println!("{}", format_output(output, format)?);
    Ok(ExitCode::SUCCESS)
}
