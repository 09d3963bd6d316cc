//! The JSON settings document and its code-path accessors.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::logging::Log;

/// Key under which the code path is stored.
pub const CODE_PATH_KEY: &str = "PSCodePath";

/// Typed view of the settings document.
///
/// Only `PSCodePath` is interpreted. Any other keys are carried in `extra`
/// and written back untouched, so a document shared with other tooling is
/// not clobbered by `set-code-path`.
///
/// # Examples
///
/// ```
/// use psmod_cli::config::Settings;
///
/// let s: Settings = serde_json::from_str(r#"{"PSCodePath": "/src", "Theme": "dark"}"#).unwrap();
/// assert_eq!(s.code_path.as_deref(), Some("/src"));
/// assert!(s.extra.contains_key("Theme"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory containing module source trees.
    #[serde(rename = "PSCodePath", default, skip_serializing_if = "Option::is_none")]
    pub code_path: Option<String>,
    /// Keys this tool does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads and writes the settings document at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store backed by the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DocumentMissing`] if the file does not exist,
    /// or an I/O / parse error if it cannot be read.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::DocumentMissing {
                path: self.path.clone(),
            });
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the document, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut content =
            serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;
        content.push('\n');
        std::fs::write(&self.path, content).map_err(io_err)
    }

    /// Persist `code_path` under `PSCodePath`.
    ///
    /// A path that does not currently exist is stored anyway; a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing document cannot be parsed or the
    /// document cannot be written.
    pub fn set_code_path(&self, code_path: &Path, log: &dyn Log) -> Result<(), ConfigError> {
        if !code_path.exists() {
            log.warn(&format!("path does not exist: {}", code_path.display()));
        }
        let mut settings = match self.load() {
            Ok(settings) => settings,
            Err(ConfigError::DocumentMissing { .. }) => Settings::default(),
            Err(e) => return Err(e),
        };
        settings.code_path = Some(code_path.to_string_lossy().into_owned());
        self.save(&settings)?;
        log.debug(&format!(
            "{CODE_PATH_KEY} = {} ({})",
            code_path.display(),
            self.path.display()
        ));
        Ok(())
    }

    /// Read `PSCodePath`, validating that it still exists.
    ///
    /// # Errors
    ///
    /// Fails when the document is absent, the key is unset or blank, or the
    /// stored path is missing on disk.
    pub fn get_code_path(&self) -> Result<PathBuf, ConfigError> {
        let settings = self.load()?;
        let raw = settings
            .code_path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::CodePathUnset {
                path: self.path.clone(),
            })?;
        let code_path = PathBuf::from(raw);
        if !code_path.exists() {
            return Err(ConfigError::CodePathMissing { path: code_path });
        }
        Ok(code_path)
    }
}
