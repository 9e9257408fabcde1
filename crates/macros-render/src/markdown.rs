//! Markdown building blocks shared by the renderers.

use crate::template_engine::TemplateEngine;
use bids_macros_core::{PagePath, Result};
use serde::Serialize;

/// Makes text safe for a single Markdown table cell.
///
/// Pipes are escaped and line breaks become `<br>`.
///
/// # Examples
///
/// ```
/// use bids_macros_render::escape_cell;
///
/// assert_eq!(escape_cell("a | b\nc"), r"a \| b<br>c");
/// ```
#[must_use]
pub fn escape_cell(text: &str) -> String {
    text.trim()
        .replace("\r\n", "\n")
        .replace('|', r"\|")
        .replace('\n', "<br>")
}

/// Rewrites source-root links for the page a snippet is rendered into.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Links<'a> {
    page: &'a PagePath,
    token: &'a str,
}

impl<'a> Links<'a> {
    pub(crate) const fn new(page: &'a PagePath, token: &'a str) -> Self {
        Self { page, token }
    }

    pub(crate) fn rewrite(&self, text: &str) -> String {
        self.page.rewrite_links(text, self.token)
    }
}

/// A Markdown table under construction. Cells are escaped on insertion.
#[derive(Debug, Serialize)]
pub(crate) struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers.into_iter().map(|h| escape_cell(h.as_ref())).collect(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row: Vec<String> = cells.into_iter().map(|c| escape_cell(c.as_ref())).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub(crate) fn render(&self, engine: &TemplateEngine<'_>) -> Result<String> {
        engine.render("table", self)
    }
}
