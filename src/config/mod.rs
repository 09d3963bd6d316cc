//! Persisted settings: where module source trees live.
pub mod settings;

pub use settings::{CODE_PATH_KEY, ConfigStore, Settings};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::platform::Platform;

/// Resolve the settings document location.
///
/// An explicit path (from `--config` or `PSMOD_CONFIG`) wins; otherwise the
/// platform default is used.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] when no explicit path is given and
/// the platform has no usable configuration directory.
pub fn resolve_settings_path(
    explicit: Option<&Path>,
    platform: &Platform,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    platform.settings_path().ok_or(ConfigError::NoConfigDir)
}

/// Open the settings store for the resolved location.
///
/// # Errors
///
/// See [`resolve_settings_path`].
pub fn open_store(explicit: Option<&Path>, platform: &Platform) -> Result<ConfigStore, ConfigError> {
    resolve_settings_path(explicit, platform).map(ConfigStore::new)
}
