//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - One subcommand per macro, plus `invoke` and `completions`
//! - `FilterArgs` - Schema filter flags shared by the rule-based macros

use bids_macros_core::{PagePath, SchemaFilter};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// BIDS documentation macros - render schema-driven Markdown snippets.
///
/// Prints the Markdown a documentation page would get from the macro, so
/// snippets can be previewed, diffed, or generated in scripts.
#[derive(Parser, Debug)]
#[command(name = "bids-macros")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ./bids-macros.toml, then the user
    /// config directory)
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Schema file, overriding the configured `schema_path`
    #[arg(long, global = true, env = "BIDS_SCHEMA", value_name = "JSON")]
    pub schema: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (markdown, json)
    #[arg(long = "format", global = true, default_value = "markdown")]
    pub format: String,
}

/// Schema filter flags.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Keep rules for this datatype (repeatable)
    #[arg(long = "datatype", value_name = "DATATYPE")]
    pub datatypes: Vec<String>,

    /// Keep rules allowing this suffix (repeatable)
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffixes: Vec<String>,

    /// Keep rules allowing this extension (repeatable)
    #[arg(long = "extension", value_name = "EXTENSION")]
    pub extensions: Vec<String>,
}

impl From<FilterArgs> for SchemaFilter {
    fn from(args: FilterArgs) -> Self {
        Self::new()
            .with_datatypes(args.datatypes)
            .with_suffixes(args.suffixes)
            .with_extensions(args.extensions)
    }
}

/// Connector style flags of the filetree command.
///
/// Without either flag the configured `filetree.use_pipe` applies.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectorArgs {
    /// Use ASCII connectors instead of box-drawing characters
    #[arg(long, conflicts_with = "unicode")]
    pub ascii: bool,

    /// Use box-drawing connectors even if the configuration selects ASCII
    #[arg(long)]
    pub unicode: bool,
}

impl ConnectorArgs {
    /// Connector override: `Some(true)` for box glyphs, `Some(false)` for
    /// ASCII, `None` to keep the configured style.
    #[must_use]
    pub const fn use_pipe(self) -> Option<bool> {
        match (self.ascii, self.unicode) {
            (true, _) => Some(false),
            (false, true) => Some(true),
            (false, false) => None,
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a directory tree from a JSON directory description.
    ///
    /// Mappings are directories, `null` or strings are files, `{}` is an
    /// empty directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// echo '{"sub-01": {"anat": {"sub-01_T1w.nii.gz": ""}}}' | bids-macros filetree -
    /// ```
    Filetree {
        /// JSON file with the directory description (`-` for stdin)
        input: PathBuf,

        #[command(flatten)]
        connectors: ConnectorArgs,
    },

    /// Print the directory layout and filename patterns of matching rules.
    FilenameTemplate {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the entity requirement table of matching rules.
    EntityTable {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print a definition section for every entity.
    EntityDefinitions,

    /// Print the glossary of all schema objects.
    Glossary {
        /// Page the glossary is rendered into, relative to the source root
        #[arg(long)]
        page: PagePath,
    },

    /// Print a table of suffixes.
    SuffixTable {
        /// Suffixes, in display order
        #[arg(required = true)]
        suffixes: Vec<String>,

        /// Page the table is rendered into, relative to the source root
        #[arg(long)]
        page: PagePath,
    },

    /// Print a table of metadata fields.
    ///
    /// # Examples
    ///
    /// ```bash
    /// bids-macros metadata-table '{"TaskName": "REQUIRED"}' --page func.md
    /// bids-macros metadata-table @fields.json --page func.md
    /// ```
    MetadataTable {
        /// Field requirements as JSON, or `@FILE` to read them from a file
        field_info: String,

        /// Page the table is rendered into, relative to the source root
        #[arg(long)]
        page: PagePath,
    },

    /// Print a table of the fields of a metadata object.
    SubobjectTable {
        /// Dotted path to the object, e.g. `metadata.Genetics`
        object_path: String,

        /// Field requirements as JSON, or `@FILE` to read them from a file
        field_info: String,

        /// Page the table is rendered into, relative to the source root
        #[arg(long)]
        page: PagePath,
    },

    /// Print a table of TSV columns.
    ColumnsTable {
        /// Column requirements as JSON, or `@FILE` to read them from a file
        column_info: String,

        /// Page the table is rendered into, relative to the source root
        #[arg(long)]
        page: PagePath,
    },

    /// Run a macro call written as JSON.
    ///
    /// # Examples
    ///
    /// ```bash
    /// echo '{"macro": "make_suffix_table", "suffixes": ["T1w"]}' \
    ///     | bids-macros invoke - --page modality-specific-files/anat.md
    /// ```
    Invoke {
        /// JSON file with the macro call (`-` for stdin)
        input: PathBuf,

        /// Page the output is rendered into, for link-sensitive macros
        #[arg(long)]
        page: Option<PagePath>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filetree() {
        let cli = Cli::parse_from(["bids-macros", "filetree", "tree.json", "--ascii"]);
        let Commands::Filetree { ref input, connectors } = cli.command else {
            panic!("Expected Filetree command");
        };
        assert_eq!(input, &PathBuf::from("tree.json"));
        assert_eq!(connectors.use_pipe(), Some(false));
        assert_eq!(cli.format, "markdown");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_filetree_connector_flags() {
        let parse = |args: &[&str]| {
            let cli = Cli::try_parse_from(
                ["bids-macros", "filetree", "-"].iter().chain(args).copied(),
            )?;
            let Commands::Filetree { connectors, .. } = cli.command else {
                panic!("Expected Filetree command");
            };
            Ok::<_, clap::Error>(connectors.use_pipe())
        };

        assert_eq!(parse(&[]).unwrap(), None);
        assert_eq!(parse(&["--unicode"]).unwrap(), Some(true));
        assert_eq!(parse(&["--ascii"]).unwrap(), Some(false));
        assert!(parse(&["--ascii", "--unicode"]).is_err());
    }

    #[test]
    fn test_parse_filter_flags() {
        let cli = Cli::parse_from([
            "bids-macros",
            "entity-table",
            "--datatype",
            "anat",
            "--suffix",
            "T1w",
            "--suffix",
            "T2w",
        ]);
        let Commands::EntityTable { filter } = cli.command else {
            panic!("Expected EntityTable command");
        };
        let filter = SchemaFilter::from(filter);
        assert_eq!(filter.datatypes, ["anat"]);
        assert_eq!(filter.suffixes, ["T1w", "T2w"]);
        assert!(filter.extensions.is_empty());
    }

    #[test]
    fn test_parse_page_is_validated() {
        let cli = Cli::parse_from([
            "bids-macros",
            "suffix-table",
            "T1w",
            "--page",
            "modality-specific-files/anat.md",
        ]);
        let Commands::SuffixTable { suffixes, page } = cli.command else {
            panic!("Expected SuffixTable command");
        };
        assert_eq!(suffixes, ["T1w"]);
        assert_eq!(page.depth(), 1);

        let result = Cli::try_parse_from(["bids-macros", "glossary", "--page", "../x.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_suffix_table_requires_suffixes() {
        let result = Cli::try_parse_from(["bids-macros", "suffix-table", "--page", "x.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "bids-macros",
            "entity-definitions",
            "--schema",
            "schema.json",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.schema, Some(PathBuf::from("schema.json")));
        assert_eq!(cli.format, "json");
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_invoke_page_optional() {
        let cli = Cli::parse_from(["bids-macros", "invoke", "-"]);
        assert!(matches!(cli.command, Commands::Invoke { page: None, .. }));
    }
}
