//! Directory-tree renderer.
//!
//! Draws a directory description the way the `tree` command does: every
//! entry gets one line, the last sibling at each level uses a corner
//! connector, and open ancestor levels continue with a vertical bar.
//!
//! ```text
//! └── sub1
//!     ├── README
//!     └── sub2
//!         └── file.txt
//! ```
//!
//! With `use_pipe = false` the same layout is drawn in plain ASCII so it
//! survives PDF export.
//!
//! # Examples
//!
//! ```
//! use bids_macros_filetree::DirectoryTree;
//! use serde_json::json;
//!
//! let tree = DirectoryTree::from_json(
//!     &json!({"sub1": {"README": null, "sub2": {"file.txt": null}}}),
//!     true,
//! )?;
//!
//! assert_eq!(
//!     tree.generate(),
//!     "└── sub1\n    ├── README\n    └── sub2\n        └── file.txt"
//! );
//! # Ok::<(), bids_macros_filetree::TreeError>(())
//! ```

use crate::types::{DirectoryEntry, Result, parse_entries};
use serde_json::Value;
use std::fmt;

/// Connector glyphs used to draw a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Connector for a sibling that is followed by more siblings.
    pub tee: &'static str,
    /// Connector for the last sibling.
    pub corner: &'static str,
    /// Indentation below a sibling that is followed by more siblings.
    pub continuation: &'static str,
    /// Indentation below the last sibling.
    pub blank: &'static str,
}

impl Glyphs {
    /// Unicode box-drawing connectors.
    pub const BOX: Self = Self {
        tee: "├── ",
        corner: "└── ",
        continuation: "│   ",
        blank: "    ",
    };

    /// Plain ASCII connectors, safe for PDF output.
    pub const ASCII: Self = Self {
        tee: "|-- ",
        corner: "`-- ",
        continuation: "|   ",
        blank: "    ",
    };

    /// Selects the glyph set for the `use_pipe` flag.
    #[must_use]
    pub const fn for_pipe(use_pipe: bool) -> Self {
        if use_pipe { Self::BOX } else { Self::ASCII }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::BOX
    }
}

/// A renderable directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTree {
    entries: Vec<DirectoryEntry>,
    glyphs: Glyphs,
    root_label: Option<String>,
    mark_directories: bool,
}

impl DirectoryTree {
    /// Creates a tree from already-built entries.
    #[must_use]
    pub fn new(entries: Vec<DirectoryEntry>, use_pipe: bool) -> Self {
        Self {
            entries,
            glyphs: Glyphs::for_pipe(use_pipe),
            root_label: None,
            mark_directories: false,
        }
    }

    /// Parses a JSON directory description.
    ///
    /// # Errors
    ///
    /// Returns a `TreeError` naming the offending node if the description
    /// is malformed.
    pub fn from_json(value: &Value, use_pipe: bool) -> Result<Self> {
        Ok(Self::new(parse_entries(value)?, use_pipe))
    }

    /// Prints `label` as an unprefixed first line above the entries.
    #[must_use]
    pub fn with_root(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Appends `/` to directory names when `mark` is `true`.
    #[must_use]
    pub const fn mark_directories(mut self, mark: bool) -> Self {
        self.mark_directories = mark;
        self
    }

    /// Replaces the glyph set.
    #[must_use]
    pub const fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Top-level entries.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Number of lines [`generate`](Self::generate) produces.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let entries: usize = self.entries.iter().map(DirectoryEntry::entry_count).sum();
        entries + usize::from(self.root_label.is_some())
    }

    /// Renders the tree.
    ///
    /// Lines are joined with `\n`, without a trailing newline. An empty tree
    /// renders as an empty string, or as the root label alone.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut lines = Vec::with_capacity(self.line_count());

        if let Some(label) = &self.root_label {
            lines.push(self.label(label, true));
        }

        let mut prefix = String::new();
        self.render_level(&self.entries, &mut prefix, &mut lines);

        lines.join("\n")
    }

    fn render_level(&self, entries: &[DirectoryEntry], prefix: &mut String, lines: &mut Vec<String>) {
        let count = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last {
                self.glyphs.corner
            } else {
                self.glyphs.tee
            };

            lines.push(format!(
                "{prefix}{connector}{}",
                self.label(entry.name(), entry.is_dir())
            ));

            let children = entry.children();
            if !children.is_empty() {
                let indent = if is_last {
                    self.glyphs.blank
                } else {
                    self.glyphs.continuation
                };
                let saved = prefix.len();
                prefix.push_str(indent);
                self.render_level(children, prefix, lines);
                prefix.truncate(saved);
            }
        }
    }

    fn label(&self, name: &str, is_dir: bool) -> String {
        if self.mark_directories && is_dir && !name.ends_with('/') {
            format!("{name}/")
        } else {
            name.to_string()
        }
    }
}

impl fmt::Display for DirectoryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generate())
    }
}

/// Renders a JSON directory description in one call.
///
/// # Errors
///
/// Returns a `TreeError` if the description is malformed.
///
/// # Examples
///
/// ```
/// use bids_macros_filetree::render_tree;
/// use serde_json::json;
///
/// let text = render_tree(&json!({"a": null, "b": null}), false)?;
/// assert_eq!(text, "|-- a\n`-- b");
/// # Ok::<(), bids_macros_filetree::TreeError>(())
/// ```
pub fn render_tree(value: &Value, use_pipe: bool) -> Result<String> {
    Ok(DirectoryTree::from_json(value, use_pipe)?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value, use_pipe: bool) -> String {
        render_tree(value, use_pipe).unwrap()
    }

    #[test]
    fn test_reference_example() {
        let out = render(
            &json!({"sub1": {"README": null, "sub2": {"file.txt": null}}}),
            true,
        );
        let expected = "\
└── sub1
    ├── README
    └── sub2
        └── file.txt";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_last_child_detection() {
        let out = render(&json!({"a": null, "b": null, "c": null}), true);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, ["├── a", "├── b", "└── c"]);
    }

    #[test]
    fn test_indentation_propagation() {
        let out = render(
            &json!({
                "first": {"grandchild1": null},
                "last": {"grandchild2": null},
            }),
            true,
        );
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "├── first",
                "│   └── grandchild1",
                "└── last",
                "    └── grandchild2",
            ]
        );
    }

    #[test]
    fn test_ascii_mode_has_no_box_glyphs() {
        let value = json!({
            "sub-01": {"anat": {"sub-01_T1w.nii.gz": ""}, "func": {}},
            "dataset_description.json": "",
        });
        let ascii = render(&value, false);
        let unicode = render(&value, true);

        assert!(!ascii.contains(['├', '└', '│', '─']));
        assert_eq!(ascii.lines().count(), unicode.lines().count());
        assert_eq!(
            ascii,
            "\
|-- sub-01
|   |-- anat
|   |   `-- sub-01_T1w.nii.gz
|   `-- func
`-- dataset_description.json"
        );
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(render(&json!({}), true), "");
        assert_eq!(render(&json!([]), false), "");
    }

    #[test]
    fn test_empty_root_with_label() {
        let tree = DirectoryTree::from_json(&json!({}), true)
            .unwrap()
            .with_root("my_dataset");
        assert_eq!(tree.generate(), "my_dataset");
        assert_eq!(tree.line_count(), 1);
    }

    #[test]
    fn test_root_label_is_unprefixed() {
        let tree = DirectoryTree::from_json(&json!({"README": null}), true)
            .unwrap()
            .with_root("ds001");
        assert_eq!(tree.generate(), "ds001\n└── README");
    }

    #[test]
    fn test_empty_directory_vs_file() {
        let out = render(&json!({"derivatives": {}, "README": null}), true);
        assert_eq!(out, "├── derivatives\n└── README");

        let marked = DirectoryTree::from_json(&json!({"derivatives": {}, "README": null}), true)
            .unwrap()
            .mark_directories(true)
            .generate();
        assert_eq!(marked, "├── derivatives/\n└── README");
    }

    #[test]
    fn test_idempotent() {
        let tree = DirectoryTree::from_json(&json!({"a": {"b": {"c": null}}}), true).unwrap();
        assert_eq!(tree.generate(), tree.generate());
    }

    #[test]
    fn test_line_count_matches_output() {
        let tree = DirectoryTree::from_json(
            &json!({"a": {"b": null, "c": {"d": null}}, "e": null}),
            true,
        )
        .unwrap();
        assert_eq!(tree.line_count(), 5);
        assert_eq!(tree.generate().lines().count(), 5);
    }

    #[test]
    fn test_deep_nesting() {
        let mut value = Value::Null;
        for level in (0..64).rev() {
            let mut map = serde_json::Map::new();
            map.insert(format!("level{level}"), value);
            value = Value::Object(map);
        }
        let out = render(&value, true);
        assert_eq!(out.lines().count(), 64);
        let last = out.lines().last().unwrap();
        assert!(last.ends_with("└── level63"));
        assert!(last.starts_with(&"    ".repeat(63)));
    }

    #[test]
    fn test_display_matches_generate() {
        let tree = DirectoryTree::from_json(&json!({"x": null}), false).unwrap();
        assert_eq!(tree.to_string(), tree.generate());
    }
}
