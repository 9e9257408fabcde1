//! Page context for link-sensitive macros.
//!
//! Schema descriptions link to other specification pages through a
//! placeholder for the documentation source root, e.g.
//! `[Common principles](SPEC_ROOT/02-common-principles.md)`. When a table is
//! rendered into a page, those links must become relative to that page. The
//! page is identified by its path relative to the source root, which the
//! caller passes explicitly.
//!
//! # Examples
//!
//! ```
//! use bids_macros_core::PagePath;
//!
//! let page = PagePath::new("modality-specific-files/electroencephalography.md")?;
//! assert_eq!(page.root_prefix(), "../");
//!
//! let text = "See [here](SPEC_ROOT/02-common-principles.md).";
//! assert_eq!(
//!     page.rewrite_links(text, "SPEC_ROOT"),
//!     "See [here](../02-common-principles.md)."
//! );
//! # Ok::<(), bids_macros_core::Error>(())
//! ```

use crate::{Error, Result};
use regex::Regex;
use std::fmt;

/// A validated page path relative to the documentation source root.
///
/// `PagePath` always uses forward slashes, is never absolute, and never
/// climbs out of the source root with `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagePath(String);

impl PagePath {
    /// Creates a new page path.
    ///
    /// Backslashes are normalized to forward slashes and a leading `./` is
    /// stripped.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPagePath` if the path is empty, absolute,
    /// contains a `..` component, or ends with a separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::PagePath;
    ///
    /// assert!(PagePath::new("appendices/glossary.md").is_ok());
    /// assert!(PagePath::new("/abs/page.md").is_err());
    /// assert!(PagePath::new("../escape.md").is_err());
    /// ```
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();
        let normalized = raw.replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");

        let invalid = |reason: &str| Error::InvalidPagePath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if normalized.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        if normalized.starts_with('/') || normalized.contains(':') {
            return Err(invalid("path must be relative to the source root"));
        }

        if normalized.ends_with('/') {
            return Err(invalid("path must name a page, not a directory"));
        }

        if normalized.split('/').any(|c| c == "..") {
            return Err(invalid("path must not contain '..'"));
        }

        Ok(Self(normalized.to_string()))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of directories between the source root and the page.
    ///
    /// Empty and `.` components are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::PagePath;
    ///
    /// assert_eq!(PagePath::new("index.md")?.depth(), 0);
    /// assert_eq!(PagePath::new("a/b/page.md")?.depth(), 2);
    /// # Ok::<(), bids_macros_core::Error>(())
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let components: Vec<&str> = self
            .0
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();
        components.len().saturating_sub(1)
    }

    /// Relative prefix that leads from this page back to the source root.
    ///
    /// `./` for a top-level page, one `../` per directory level otherwise.
    #[must_use]
    pub fn root_prefix(&self) -> String {
        match self.depth() {
            0 => "./".to_string(),
            depth => "../".repeat(depth),
        }
    }

    /// Rewrites every `TOKEN/` occurrence in `text` to this page's root
    /// prefix.
    ///
    /// A token starting with a word character only matches as a whole
    /// word, so `MY_SPEC_ROOT/` is left untouched when the token is
    /// `SPEC_ROOT`. Tokens starting with punctuation (`$ROOT`, `{ROOT}`)
    /// already delimit themselves and match anywhere.
    #[must_use]
    pub fn rewrite_links(&self, text: &str, token: &str) -> String {
        if token.is_empty() || !text.contains(token) {
            return text.to_string();
        }

        let boundary = if token.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let pattern = format!("{boundary}{}/", regex::escape(token));
        match Regex::new(&pattern) {
            Ok(re) => {
                let prefix = self.root_prefix();
                re.replace_all(text, regex::NoExpand(&prefix)).into_owned()
            }
            // The pattern is built from an escaped literal and always compiles.
            Err(_) => text.to_string(),
        }
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PagePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path_valid() {
        let page = PagePath::new("appendices/glossary.md").unwrap();
        assert_eq!(page.as_str(), "appendices/glossary.md");
        assert_eq!(page.depth(), 1);
    }

    #[test]
    fn test_page_path_normalizes_separators() {
        let page = PagePath::new(r".\appendices\entities.md").unwrap();
        assert_eq!(page.as_str(), "appendices/entities.md");
    }

    #[test]
    fn test_page_path_rejects_invalid() {
        for bad in ["", "   ", "/index.md", "C:/docs/x.md", "a/../b.md", "dir/"] {
            let err = PagePath::new(bad).unwrap_err();
            assert!(err.is_input_error(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_root_prefix_by_depth() {
        assert_eq!(PagePath::new("index.md").unwrap().root_prefix(), "./");
        assert_eq!(PagePath::new("a/page.md").unwrap().root_prefix(), "../");
        assert_eq!(
            PagePath::new("a/b/c/page.md").unwrap().root_prefix(),
            "../../../"
        );
    }

    #[test]
    fn test_rewrite_links_top_level() {
        let page = PagePath::new("02-common-principles.md").unwrap();
        let text = "[Common principles](SPEC_ROOT/02-common-principles.md)";
        assert_eq!(
            page.rewrite_links(text, "SPEC_ROOT"),
            "[Common principles](./02-common-principles.md)"
        );
    }

    #[test]
    fn test_rewrite_links_multiple_occurrences() {
        let page = PagePath::new("appendices/units.md").unwrap();
        let text = "[a](SPEC_ROOT/a.md) and [b](SPEC_ROOT/sub/b.md#x)";
        assert_eq!(
            page.rewrite_links(text, "SPEC_ROOT"),
            "[a](../a.md) and [b](../sub/b.md#x)"
        );
    }

    #[test]
    fn test_rewrite_links_whole_word_only() {
        let page = PagePath::new("a/b.md").unwrap();
        let text = "MY_SPEC_ROOT/x.md SPEC_ROOT/y.md";
        assert_eq!(
            page.rewrite_links(text, "SPEC_ROOT"),
            "MY_SPEC_ROOT/x.md ../y.md"
        );
    }

    #[test]
    fn test_rewrite_links_punctuated_tokens() {
        let page = PagePath::new("a/b.md").unwrap();
        assert_eq!(
            page.rewrite_links("[x]($ROOT/x.md)", "$ROOT"),
            "[x](../x.md)"
        );
        assert_eq!(
            page.rewrite_links("See {ROOT}/y.md and ({ROOT}/z.md).", "{ROOT}"),
            "See ../y.md and (../z.md)."
        );
        assert_eq!(
            page.rewrite_links("[x](SPEC_ROOT_/x.md)", "SPEC_ROOT_"),
            "[x](../x.md)"
        );
    }

    #[test]
    fn test_rewrite_links_without_token_is_identity() {
        let page = PagePath::new("a/b.md").unwrap();
        assert_eq!(page.rewrite_links("plain text", "SPEC_ROOT"), "plain text");
    }

    #[test]
    fn test_from_str() {
        let page: PagePath = "index.md".parse().unwrap();
        assert_eq!(format!("{page}"), "index.md");
    }
}
