//! Directory and file resources.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, is_real_dir};
use super::{Applicable, ResourceChange};

/// A directory that must exist (ancestors included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDirResource {
    /// Directory to create.
    pub path: PathBuf,
}

impl CreateDirResource {
    /// Create a new directory resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Applicable for CreateDirResource {
    fn description(&self) -> String {
        format!("create directory {}", self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.path.is_dir() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("creating directory {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}

/// A directory tree that must not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveDirResource {
    /// Directory to remove recursively.
    pub path: PathBuf,
}

impl RemoveDirResource {
    /// Create a new removal resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Applicable for RemoveDirResource {
    fn description(&self) -> String {
        format!("remove directory {}", self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.path.symlink_metadata().is_err() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        // A link is removed as a link; its target is left alone.
        let removed = if is_real_dir(&self.path) {
            std::fs::remove_dir_all(&self.path)
        } else {
            std::fs::remove_file(&self.path)
        };
        removed.with_context(|| format!("removing {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}

/// A file copied from the source tree into the target.
///
/// Symlinked sources are followed, so the target receives the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFileResource {
    /// Source file.
    pub from: PathBuf,
    /// Destination path.
    pub to: PathBuf,
}

impl CopyFileResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(from: PathBuf, to: PathBuf) -> Self {
        Self { from, to }
    }
}

impl Applicable for CopyFileResource {
    fn description(&self) -> String {
        format!("copy {} -> {}", self.from.display(), self.to.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        ensure_parent_dir(&self.to)?;
        std::fs::copy(&self.from, &self.to).with_context(|| {
            format!("copying {} to {}", self.from.display(), self.to.display())
        })?;
        Ok(ResourceChange::Applied)
    }
}
