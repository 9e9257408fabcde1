//! Fluent builder for directory descriptions.
//!
//! Useful when a tree is assembled in code rather than written as JSON by a
//! page author, for instance when a macro derives an example layout from
//! schema rules.
//!
//! # Examples
//!
//! ```
//! use bids_macros_filetree::DirectoryTreeBuilder;
//!
//! let tree = DirectoryTreeBuilder::new()
//!     .dir("sub1", |d| d.file("README").dir("sub2", |d| d.file("file.txt")))
//!     .build(true)?;
//!
//! assert_eq!(
//!     tree.generate(),
//!     "└── sub1\n    ├── README\n    └── sub2\n        └── file.txt"
//! );
//! # Ok::<(), bids_macros_filetree::TreeError>(())
//! ```

use crate::tree::DirectoryTree;
use crate::types::{DirectoryEntry, Result, TreeError, validate_name};

/// Builder for a directory tree.
///
/// Names are validated as they are added; the first invalid name is
/// reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct DirectoryTreeBuilder {
    entries: Vec<DirectoryEntry>,
    path: String,
    errors: Vec<TreeError>,
}

impl DirectoryTreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn nested(path: String) -> Self {
        Self {
            entries: Vec::new(),
            path,
            errors: Vec::new(),
        }
    }

    fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.path)
        }
    }

    /// Adds a file.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Err(e) = validate_name(&name, &self.child_path(&name)) {
            self.errors.push(e);
        }
        self.entries.push(DirectoryEntry::file(name));
        self
    }

    /// Adds several files in order.
    #[must_use]
    pub fn files<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, Self::file)
    }

    /// Adds a directory whose contents are built by `contents`.
    #[must_use]
    pub fn dir<F>(mut self, name: impl Into<String>, contents: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let name = name.into();
        let path = self.child_path(&name);
        if let Err(e) = validate_name(&name, &path) {
            self.errors.push(e);
        }

        let child = contents(Self::nested(path));
        self.errors.extend(child.errors);
        self.entries.push(DirectoryEntry::dir(name, child.entries));
        self
    }

    /// Adds an empty directory.
    #[must_use]
    pub fn empty_dir(self, name: impl Into<String>) -> Self {
        self.dir(name, |d| d)
    }

    /// Returns the collected entries.
    ///
    /// # Errors
    ///
    /// Returns the first name validation error, if any.
    pub fn into_entries(mut self) -> Result<Vec<DirectoryEntry>> {
        if self.errors.is_empty() {
            Ok(self.entries)
        } else {
            Err(self.errors.swap_remove(0))
        }
    }

    /// Builds a renderable tree.
    ///
    /// # Errors
    ///
    /// Returns the first name validation error, if any.
    pub fn build(self, use_pipe: bool) -> Result<DirectoryTree> {
        Ok(DirectoryTree::new(self.into_entries()?, use_pipe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_empty() {
        let tree = DirectoryTreeBuilder::new().build(true).unwrap();
        assert_eq!(tree.generate(), "");
    }

    #[test]
    fn test_builder_files_in_order() {
        let tree = DirectoryTreeBuilder::new()
            .files(["c", "a", "b"])
            .build(false)
            .unwrap();
        assert_eq!(tree.generate(), "|-- c\n|-- a\n`-- b");
    }

    #[test]
    fn test_builder_empty_dir() {
        let entries = DirectoryTreeBuilder::new()
            .empty_dir("derivatives")
            .into_entries()
            .unwrap();
        assert!(entries[0].is_dir());
        assert!(entries[0].children().is_empty());
    }

    #[test]
    fn test_builder_reports_nested_invalid_name() {
        let err = DirectoryTreeBuilder::new()
            .dir("sub-01", |d| d.dir("anat", |d| d.file("")))
            .build(true)
            .unwrap_err();
        assert_eq!(err.path(), "sub-01/anat/");
    }
}
