//! Configuration for the documentation macros.
//!
//! The configuration is read once at the start of a documentation build and
//! handed to the macro provider. It is stored as TOML:
//!
//! ```toml
//! schema_path = "src/schema.json"
//! link_root_token = "SPEC_ROOT"
//!
//! [filetree]
//! use_pipe = true
//! mark_directories = false
//! ```
//!
//! # Examples
//!
//! ```
//! use bids_macros_core::MacroConfig;
//!
//! let config = MacroConfig::default();
//! assert_eq!(config.link_root_token, "SPEC_ROOT");
//! assert!(config.filetree.use_pipe);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory when no explicit
/// configuration path is given.
pub const CONFIG_FILE_NAME: &str = "bids-macros.toml";

/// Default schema location, relative to the documentation project root.
pub const DEFAULT_SCHEMA_PATH: &str = "src/schema.json";

/// Default placeholder used by schema descriptions for the source root.
pub const DEFAULT_LINK_ROOT_TOKEN: &str = "SPEC_ROOT";

/// Macro provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacroConfig {
    /// Path to the compiled JSON schema.
    ///
    /// Default: `src/schema.json`
    pub schema_path: PathBuf,

    /// Placeholder that schema descriptions use for the documentation
    /// source root (`SPEC_ROOT/02-common-principles.md`).
    ///
    /// Default: `SPEC_ROOT`
    pub link_root_token: String,

    /// Defaults for the directory-tree macro.
    pub filetree: FiletreeConfig,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            link_root_token: DEFAULT_LINK_ROOT_TOKEN.to_string(),
            filetree: FiletreeConfig::default(),
        }
    }
}

/// Defaults for rendering directory trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiletreeConfig {
    /// Use box-drawing connectors. Set to `false` for PDF builds.
    pub use_pipe: bool,

    /// Append `/` to directory names.
    pub mark_directories: bool,
}

impl Default for FiletreeConfig {
    fn default() -> Self {
        Self {
            use_pipe: true,
            mark_directories: false,
        }
    }
}

impl MacroConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the TOML is invalid, contains unknown
    /// keys, or fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::MacroConfig;
    ///
    /// let config = MacroConfig::from_toml_str(r#"schema_path = "schema.json""#)?;
    /// assert_eq!(config.schema_path.to_str(), Some("schema.json"));
    /// assert_eq!(config.link_root_token, "SPEC_ROOT");
    /// # Ok::<(), bids_macros_core::Error>(())
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or
    /// `Error::ConfigError` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading macro config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Finds and loads the configuration for a documentation build.
    ///
    /// Lookup order:
    /// 1. `explicit`, when given (must exist)
    /// 2. `bids-macros.toml` in `working_dir`
    /// 3. `<config dir>/bids-macros/config.toml`
    /// 4. built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but is invalid, or
    /// if `explicit` cannot be read.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = working_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(&local);
        }

        if let Some(user) = user_config_path().filter(|p| p.is_file()) {
            return Self::load(&user);
        }

        debug!("No macro config found, using defaults");
        Ok(Self::default())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the schema path or link token is empty,
    /// or if the link token contains a path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_core::MacroConfig;
    ///
    /// let mut config = MacroConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.link_root_token = String::new();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.schema_path.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "schema_path must not be empty".to_string(),
            });
        }

        if self.link_root_token.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "link_root_token must not be empty".to_string(),
            });
        }

        if self.link_root_token.contains('/') {
            return Err(Error::ConfigError {
                message: format!(
                    "link_root_token must not contain '/': {}",
                    self.link_root_token
                ),
            });
        }

        Ok(())
    }

    /// Returns the schema path resolved against `base` when it is relative.
    #[must_use]
    pub fn resolved_schema_path(&self, base: &Path) -> PathBuf {
        if self.schema_path.is_absolute() {
            self.schema_path.clone()
        } else {
            base.join(&self.schema_path)
        }
    }
}

/// Per-user configuration file location.
///
/// - Linux/macOS: `~/.config/bids-macros/config.toml`
/// - Windows: `%APPDATA%\bids-macros\config.toml`
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bids-macros").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MacroConfig::default();
        assert_eq!(config.schema_path, PathBuf::from("src/schema.json"));
        assert_eq!(config.link_root_token, "SPEC_ROOT");
        assert!(config.filetree.use_pipe);
        assert!(!config.filetree.mark_directories);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = MacroConfig::from_toml_str(
            r"
[filetree]
use_pipe = false
",
        )
        .unwrap();
        assert!(!config.filetree.use_pipe);
        assert_eq!(config.schema_path, PathBuf::from(DEFAULT_SCHEMA_PATH));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = MacroConfig::from_toml_str("schema = 'x.json'").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = MacroConfig::from_toml_str("link_root_token = 'A/B'").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_accepted_token_is_rewritten() {
        let config = MacroConfig::from_toml_str("link_root_token = '$ROOT'").unwrap();
        let page = crate::PagePath::new("a/b.md").unwrap();
        assert_eq!(
            page.rewrite_links("[x]($ROOT/x.md)", &config.link_root_token),
            "[x](../x.md)"
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = MacroConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = MacroConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_discover_prefers_local_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "schema_path = 'local.json'",
        )
        .unwrap();

        let config = MacroConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.schema_path, PathBuf::from("local.json"));
    }

    #[test]
    fn test_discover_explicit_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = MacroConfig::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_resolved_schema_path() {
        let config = MacroConfig::default();
        let resolved = config.resolved_schema_path(Path::new("/docs"));
        assert_eq!(resolved, PathBuf::from("/docs/src/schema.json"));
    }
}
