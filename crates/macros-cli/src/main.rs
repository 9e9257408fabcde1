//! BIDS documentation macros CLI.
//!
//! Renders the schema-driven Markdown snippets of the BIDS specification
//! from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Filename template for anatomical data
//! bids-macros filename-template --datatype anat
//!
//! # Suffix table as it appears on a modality page
//! bids-macros suffix-table T1w T2w --page modality-specific-files/anat.md
//!
//! # Directory tree from a JSON description
//! echo '{"sub-01": {"anat": {}}}' | bids-macros filetree -
//! ```

use anyhow::Result;
use bids_macros_cli::commands;
use bids_macros_cli::formatters::format_error;
use bids_macros_cli::{Cli, Commands, Globals};
use bids_macros_core::Error;
use bids_macros_core::cli::{ExitCode, OutputFormat};
use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}", format_error(&e));
    }

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format_error(&e));
            e.downcast_ref::<Error>()
                .map_or(ExitCode::ERROR, ExitCode::for_error)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let output_format = cli.format.parse::<OutputFormat>()?;
    let working_dir = std::env::current_dir()?;
    let globals = Globals::new(cli.config, cli.schema, working_dir);

    execute_command(cli.command, &globals, output_format)
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr so that stdout carries only the rendered output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Routes commands to their handlers.
///
/// # Errors
///
/// Returns an error if command execution fails.
fn execute_command(
    command: Commands,
    globals: &Globals,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::Filetree { input, connectors } => {
            commands::filetree::run(globals, &input, connectors.use_pipe(), output_format)
        }
        Commands::FilenameTemplate { filter } => {
            commands::templates::run_filename_template(globals, filter.into(), output_format)
        }
        Commands::EntityTable { filter } => {
            commands::templates::run_entity_table(globals, filter.into(), output_format)
        }
        Commands::EntityDefinitions => {
            commands::templates::run_entity_definitions(globals, output_format)
        }
        Commands::Glossary { page } => commands::glossary::run(globals, &page, output_format),
        Commands::SuffixTable { suffixes, page } => {
            commands::tables::run_suffix_table(globals, &suffixes, &page, output_format)
        }
        Commands::MetadataTable { field_info, page } => {
            commands::tables::run_metadata_table(globals, &field_info, &page, output_format)
        }
        Commands::SubobjectTable {
            object_path,
            field_info,
            page,
        } => commands::tables::run_subobject_table(
            globals,
            &object_path,
            &field_info,
            &page,
            output_format,
        ),
        Commands::ColumnsTable { column_info, page } => {
            commands::tables::run_columns_table(globals, &column_info, &page, output_format)
        }
        Commands::Invoke { input, page } => {
            commands::invoke::run(globals, &input, page.as_ref(), output_format)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
