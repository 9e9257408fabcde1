//! Error types for the BIDS documentation macros.
//!
//! Every failure a macro can hit surfaces through [`Error`]. The variants
//! carry enough context (paths, object names, filter keys) for a page author
//! to find the offending macro call without reading a backtrace.
//!
//! # Examples
//!
//! ```
//! use bids_macros_core::{Error, Result};
//!
//! fn lookup_suffix(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ObjectNotFound {
//!             category: "suffixes".to_string(),
//!             name: name.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = lookup_suffix("").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the documentation macros.
///
/// All crates in the workspace except the tree renderer report through
/// this type; tree errors are mapped into [`Error::MalformedTree`] at the
/// macro boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Schema file does not exist.
    #[error("Schema not found: {}", path.display())]
    SchemaNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Schema file exists but could not be parsed.
    #[error("Failed to parse schema {}: {source}", path.display())]
    SchemaParse {
        /// Path of the schema file
        path: PathBuf,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A named schema object does not exist.
    ///
    /// Raised when a macro asks for a suffix, metadata field, column, or
    /// sub-object that the loaded schema does not define.
    #[error("Schema object not found: {category}.{name}")]
    ObjectNotFound {
        /// Object category (e.g. `suffixes`, `metadata`)
        category: String,
        /// Object key that was requested
        name: String,
    },

    /// A filter value does not name anything in the schema.
    #[error("Unknown value '{value}' for filter '{key}'")]
    UnknownFilterValue {
        /// Filter key (`datatypes`, `suffixes`, `extensions`)
        key: String,
        /// The value that matched nothing
        value: String,
    },

    /// The page path passed to a link-sensitive macro is invalid.
    #[error("Invalid page path '{path}': {reason}")]
    InvalidPagePath {
        /// The rejected path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// A directory description has the wrong shape.
    #[error("Malformed directory description at '{path}': {reason}")]
    MalformedTree {
        /// Slash-separated path of the offending node
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the failure
        message: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or cannot be read.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when macro or CLI arguments are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error while reading an input file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if a schema file or schema object could not be found.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::SchemaNotFound {
    ///     path: PathBuf::from("src/schema.json"),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SchemaNotFound { .. } | Self::ObjectNotFound { .. }
        )
    }

    /// Returns `true` if this is a schema parse error.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::SchemaParse { .. })
    }

    /// Returns `true` if this is a filter validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::Error;
    ///
    /// let err = Error::UnknownFilterValue {
    ///     key: "datatypes".to_string(),
    ///     value: "bogus".to_string(),
    /// };
    /// assert!(err.is_filter_error());
    /// ```
    #[must_use]
    pub const fn is_filter_error(&self) -> bool {
        matches!(self, Self::UnknownFilterValue { .. })
    }

    /// Returns `true` if the error was caused by caller-supplied input.
    ///
    /// Input errors map to the `INVALID_INPUT` exit code in the CLI.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::Error;
    ///
    /// let err = Error::MalformedTree {
    ///     path: "sub-01/anat".to_string(),
    ///     reason: "expected a mapping, found number".to_string(),
    /// };
    /// assert!(err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFilterValue { .. }
                | Self::InvalidPagePath { .. }
                | Self::MalformedTree { .. }
                | Self::InvalidArgument(_)
                | Self::ObjectNotFound { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "schema_path must not be empty".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }
}

/// Result type alias for macro operations.
///
/// # Examples
///
/// ```
/// use bids_macros_core::{Error, Result};
///
/// fn require_page(page: Option<&str>) -> Result<&str> {
///     page.ok_or_else(|| Error::InvalidArgument("page is required".to_string()))
/// }
///
/// assert!(require_page(Some("index.md")).is_ok());
/// assert!(require_page(None).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
