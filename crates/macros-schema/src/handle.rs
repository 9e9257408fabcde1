//! Schema loading and the cached schema handle.
//!
//! A documentation build loads the schema once through a [`SchemaHandle`]
//! and shares it with every macro call. The handle can be reloaded
//! explicitly, e.g. by a live-reload server after the schema changed.
//!
//! # Examples
//!
//! ```
//! use bids_macros_schema::{Schema, SchemaHandle};
//!
//! let schema = Schema::from_json_str(r#"{"objects": {}}"#)?;
//! let handle = SchemaHandle::from_schema(schema);
//!
//! assert!(handle.path().is_none());
//! assert_eq!(handle.generation(), 1);
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::model::Schema;
use bids_macros_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Replaces the home directory with `~` so error messages do not leak
/// usernames.
fn sanitize_path_for_error(path: &Path) -> PathBuf {
    dirs::home_dir()
        .and_then(|home| path.strip_prefix(&home).ok().map(|rest| Path::new("~").join(rest)))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Reads and parses a schema file.
///
/// # Errors
///
/// Returns:
/// - `Error::SchemaNotFound` if the file does not exist
/// - `Error::Io` if it cannot be read
/// - `Error::SchemaParse` if it is not a valid schema
pub fn load_schema(path: &Path) -> Result<Schema> {
    if !path.is_file() {
        return Err(Error::SchemaNotFound {
            path: sanitize_path_for_error(path),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: sanitize_path_for_error(path),
        source,
    })?;

    let schema = Schema::from_json_str(&text).map_err(|source| Error::SchemaParse {
        path: sanitize_path_for_error(path),
        source,
    })?;

    info!(
        "Loaded schema {} from {} ({} file rules)",
        schema.schema_version.as_deref().unwrap_or("(unversioned)"),
        path.display(),
        schema.file_rules().len()
    );

    Ok(schema)
}

/// Shared, explicitly reloadable access to a loaded schema.
///
/// Cloning the inner schema is cheap: [`schema`](Self::schema) hands out an
/// `Arc`. A reload swaps the `Arc`; callers holding the old one keep a
/// consistent snapshot.
#[derive(Debug, Clone)]
pub struct SchemaHandle {
    path: Option<PathBuf>,
    schema: Arc<Schema>,
    generation: u64,
}

impl SchemaHandle {
    /// Loads the schema at `path`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`load_schema`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let schema = load_schema(&path)?;
        Ok(Self {
            path: Some(path),
            schema: Arc::new(schema),
            generation: 1,
        })
    }

    /// Wraps an in-memory schema. Such a handle has no path and
    /// [`reload`](Self::reload) leaves it unchanged.
    #[must_use]
    pub fn from_schema(schema: Schema) -> Self {
        Self {
            path: None,
            schema: Arc::new(schema),
            generation: 1,
        }
    }

    /// The current schema snapshot.
    #[must_use]
    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// Borrowed access to the current schema.
    #[must_use]
    pub fn get(&self) -> &Schema {
        &self.schema
    }

    /// File the schema was loaded from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Incremented on every successful reload, starting at 1.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Re-reads the schema from disk.
    ///
    /// On failure the previous schema stays in place.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`load_schema`].
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            debug!("Schema handle has no backing file, nothing to reload");
            return Ok(());
        };

        let schema = load_schema(path)?;
        self.schema = Arc::new(schema);
        self.generation += 1;
        debug!("Schema reloaded (generation {})", self.generation);
        Ok(())
    }
}
