//! Install planning: from a module source directory to an [`InstallPlan`].
//!
//! Planning reads the source tree and the target location but never writes.
//! The plan is then run through a [`Gate`] by [`apply`].
mod gate;
mod plan;

pub use gate::{ApplyStats, Gate, Prompter, StdinPrompter, apply};
pub use plan::{Action, InstallPlan};

#[cfg(test)]
pub use gate::MockPrompter;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::InstallError;
use crate::ignore;
use crate::logging::Log;
use crate::manifest::ModuleManifest;

/// Plans installs into a fixed per-user module root.
#[derive(Debug, Clone)]
pub struct Installer {
    module_root: PathBuf,
}

impl Installer {
    /// Create an installer targeting `module_root`.
    #[must_use]
    pub fn new(module_root: impl Into<PathBuf>) -> Self {
        Self {
            module_root: module_root.into(),
        }
    }

    /// The module root installs land in.
    #[must_use]
    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    /// `<module root>/<name>/<version>` for `manifest`.
    #[must_use]
    pub fn target_dir(&self, manifest: &ModuleManifest) -> PathBuf {
        self.module_root.join(&manifest.name).join(&manifest.version)
    }

    /// Plan the install of module `name` from `source`.
    ///
    /// `name` is matched against `<name>.psd1` in `source` without regard to
    /// case; the plan carries the manifest's casing. With `force`, an
    /// existing target is scheduled for removal; without it an existing
    /// target is an error.
    ///
    /// # Errors
    ///
    /// - [`InstallError::InvalidSource`] if `source` is not a directory
    /// - [`InstallError::ManifestNotFound`] / [`InstallError::VersionMissing`]
    /// - [`InstallError::TargetExists`] if the target exists and `force` is off
    /// - I/O or traversal errors while reading the source tree
    pub fn plan(
        &self,
        source: &Path,
        name: &str,
        force: bool,
        log: &dyn Log,
    ) -> Result<InstallPlan, InstallError> {
        let source = dunce::canonicalize(source)
            .ok()
            .filter(|p| p.is_dir())
            .ok_or_else(|| InstallError::InvalidSource {
                path: source.to_path_buf(),
            })?;

        let manifest = ModuleManifest::discover(&source, name)?;
        if manifest.name != name {
            log.debug(&format!("module name corrected: {name} -> {}", manifest.name));
        }
        log.debug(&format!(
            "manifest {} (version {})",
            manifest.path.display(),
            manifest.version
        ));

        let target = self.target_dir(&manifest);
        let mut actions = Vec::new();
        if target.symlink_metadata().is_ok() {
            if !force {
                return Err(InstallError::TargetExists { path: target });
            }
            actions.push(Action::remove_dir(target.clone()));
        }
        actions.push(Action::create_dir(target.clone()));

        let exclusions = ignore::resolve(&source)?;
        for path in &exclusions {
            log.debug(&format!("excluded: {}", path.display()));
        }

        let walker = WalkDir::new(&source)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !exclusions.contains(e.path()));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.path().is_some_and(|p| exclusions.contains(p)) => continue,
                Err(err) => return Err(err.into()),
            };
            let Ok(rel) = entry.path().strip_prefix(&source) else {
                continue;
            };
            let dest = target.join(rel);
            if entry.file_type().is_dir() {
                actions.push(Action::create_dir(dest));
            } else {
                actions.push(Action::copy_file(entry.path().to_path_buf(), dest));
            }
        }

        Ok(InstallPlan::new(
            manifest.name,
            manifest.version,
            source,
            target,
            exclusions,
            actions,
        ))
    }
}
