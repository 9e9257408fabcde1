//! Schema filters accepted by the table and template macros.
//!
//! A filter narrows the file rules a macro looks at. Each key is optional;
//! an absent or empty list does not constrain anything.
//!
//! # Examples
//!
//! ```
//! use bids_macros_core::{FilterKey, SchemaFilter};
//!
//! let filter = SchemaFilter::new()
//!     .with_datatypes(["anat"])
//!     .with_suffixes(["T1w", "T2w"]);
//!
//! assert!(!filter.is_empty());
//! assert_eq!(filter.values(FilterKey::Suffixes), ["T1w", "T2w"]);
//! assert!(filter.values(FilterKey::Extensions).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Restrict to rules for these datatypes (`anat`, `func`, ...).
    Datatypes,
    /// Restrict to rules that allow these suffixes.
    Suffixes,
    /// Restrict to rules that allow these extensions.
    Extensions,
}

impl FilterKey {
    /// All keys in a fixed order.
    pub const ALL: [Self; 3] = [Self::Datatypes, Self::Suffixes, Self::Extensions];

    /// Name of the key as written in macro calls and in the schema's
    /// `objects` section.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Datatypes => "datatypes",
            Self::Suffixes => "suffixes",
            Self::Extensions => "extensions",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit filter over the schema's file rules.
///
/// Unknown keys are rejected during deserialization. Values are checked
/// against the loaded schema by the schema crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaFilter {
    /// Datatypes to keep.
    pub datatypes: Vec<String>,
    /// Suffixes to keep.
    pub suffixes: Vec<String>,
    /// Extensions to keep.
    pub extensions: Vec<String>,
}

impl SchemaFilter {
    /// Creates an empty filter that matches every rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the datatypes list.
    #[must_use]
    pub fn with_datatypes<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datatypes = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the suffixes list.
    #[must_use]
    pub fn with_suffixes<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffixes = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the extensions list.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the values for a key.
    #[must_use]
    pub fn values(&self, key: FilterKey) -> &[String] {
        match key {
            FilterKey::Datatypes => &self.datatypes,
            FilterKey::Suffixes => &self.suffixes,
            FilterKey::Extensions => &self.extensions,
        }
    }

    /// Returns `true` if no key constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|k| self.values(*k).is_empty())
    }
}
