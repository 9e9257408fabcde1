//! Directory description model.
//!
//! A directory description is what page authors write to show an example
//! dataset layout. It arrives as nested JSON:
//!
//! - `null` or a string (conventionally `""`) marks a **file**
//! - a mapping marks a **directory**; `{}` is an empty directory
//! - a sequence marks a directory whose items are file names, or mappings
//!   whose entries are appended in order
//!
//! Anything else is malformed and rejected with the path of the offending
//! node.
//!
//! # Examples
//!
//! ```
//! use bids_macros_filetree::{DirectoryEntry, parse_entries};
//! use serde_json::json;
//!
//! let entries = parse_entries(&json!({
//!     "sub-01": {"anat": {"sub-01_T1w.nii.gz": ""}},
//!     "README": null,
//! }))?;
//!
//! assert_eq!(entries.len(), 2);
//! assert!(entries[0].is_dir());
//! assert!(entries[1].is_file());
//! # Ok::<(), bids_macros_filetree::TreeError>(())
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while reading a directory description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node has a JSON type that is neither a file marker nor a directory.
    #[error("unexpected {found} at '{path}' (expected null, string, mapping, or sequence)")]
    UnexpectedValue {
        /// Slash-separated path of the node
        path: String,
        /// JSON type that was found
        found: &'static str,
    },

    /// The top level is not a mapping or sequence.
    #[error("directory description must be a mapping or sequence, found {found}")]
    InvalidRoot {
        /// JSON type that was found
        found: &'static str,
    },

    /// An entry name cannot be drawn on a single line.
    #[error("invalid entry name at '{path}': {reason}")]
    InvalidName {
        /// Slash-separated path of the node
        path: String,
        /// Why the name was rejected
        reason: &'static str,
    },
}

impl TreeError {
    /// Slash-separated path of the offending node, or `""` for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::UnexpectedValue { path, .. } | Self::InvalidName { path, .. } => path,
            Self::InvalidRoot { .. } => "",
        }
    }
}

/// Type alias for tree operation results.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Whether an entry is a file or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A leaf file.
    File,
    /// A directory and its children, in display order.
    Directory(Vec<DirectoryEntry>),
}

/// One file or directory in a directory description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: String,
    kind: EntryKind,
}

impl DirectoryEntry {
    /// Creates a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Creates a directory entry with the given children.
    #[must_use]
    pub fn dir(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory(children),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File or directory.
    #[must_use]
    pub const fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// Returns `true` for files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// Returns `true` for directories, including empty ones.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(_))
    }

    /// Children of a directory; empty for files.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            EntryKind::File => &[],
            EntryKind::Directory(children) => children,
        }
    }

    /// Number of entries in this subtree, including this one.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        1 + self.children().iter().map(Self::entry_count).sum::<usize>()
    }
}

/// Parses the top level of a directory description.
///
/// # Errors
///
/// Returns `TreeError::InvalidRoot` if `value` is not a mapping or
/// sequence, and the errors of nested nodes otherwise.
pub fn parse_entries(value: &Value) -> Result<Vec<DirectoryEntry>> {
    match value {
        Value::Object(map) => parse_mapping(map, ""),
        Value::Array(items) => parse_sequence(items, ""),
        other => Err(TreeError::InvalidRoot {
            found: json_type(other),
        }),
    }
}

fn parse_mapping(map: &Map<String, Value>, parent: &str) -> Result<Vec<DirectoryEntry>> {
    map.iter()
        .map(|(name, value)| parse_entry(name, value, parent))
        .collect()
}

fn parse_sequence(items: &[Value], parent: &str) -> Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let item_path = || join_path(parent, &format!("[{index}]"));
        match item {
            Value::String(name) => {
                validate_name(name, &item_path())?;
                entries.push(DirectoryEntry::file(name.clone()));
            }
            Value::Object(map) => entries.extend(parse_mapping(map, parent)?),
            other => {
                return Err(TreeError::UnexpectedValue {
                    path: item_path(),
                    found: json_type(other),
                });
            }
        }
    }

    Ok(entries)
}

fn parse_entry(name: &str, value: &Value, parent: &str) -> Result<DirectoryEntry> {
    let path = join_path(parent, name);
    validate_name(name, &path)?;

    match value {
        Value::Null | Value::String(_) => Ok(DirectoryEntry::file(name)),
        Value::Object(map) => Ok(DirectoryEntry::dir(name, parse_mapping(map, &path)?)),
        Value::Array(items) => Ok(DirectoryEntry::dir(name, parse_sequence(items, &path)?)),
        other => Err(TreeError::UnexpectedValue {
            path,
            found: json_type(other),
        }),
    }
}

/// Rejects names that would break the one-line-per-entry layout.
pub(crate) fn validate_name(name: &str, path: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TreeError::InvalidName {
            path: path.to_string(),
            reason: "name is empty",
        });
    }

    if name.contains(['\n', '\r']) {
        return Err(TreeError::InvalidName {
            path: path.to_string(),
            reason: "name contains a line break",
        });
    }

    Ok(())
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
