//! The explicit, side-effect-free result of planning an install.
use anyhow::Result;
use std::path::PathBuf;

use crate::ignore::ExclusionSet;
use crate::resources::fs::{CopyFileResource, CreateDirResource, RemoveDirResource};
use crate::resources::{Applicable, ResourceChange};

/// One mutating step of an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Delete an existing install before replacing it.
    RemoveDir(RemoveDirResource),
    /// Create a directory in the target tree.
    CreateDir(CreateDirResource),
    /// Copy one file from the source tree.
    CopyFile(CopyFileResource),
}

impl Action {
    /// Shorthand for [`Action::RemoveDir`].
    #[must_use]
    pub const fn remove_dir(path: PathBuf) -> Self {
        Self::RemoveDir(RemoveDirResource::new(path))
    }

    /// Shorthand for [`Action::CreateDir`].
    #[must_use]
    pub const fn create_dir(path: PathBuf) -> Self {
        Self::CreateDir(CreateDirResource::new(path))
    }

    /// Shorthand for [`Action::CopyFile`].
    #[must_use]
    pub const fn copy_file(from: PathBuf, to: PathBuf) -> Self {
        Self::CopyFile(CopyFileResource::new(from, to))
    }

    fn resource(&self) -> &dyn Applicable {
        match self {
            Self::RemoveDir(r) => r,
            Self::CreateDir(r) => r,
            Self::CopyFile(r) => r,
        }
    }
}

impl Applicable for Action {
    fn description(&self) -> String {
        self.resource().description()
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.resource().apply()
    }
}

/// Everything an install will do, computed before anything is touched.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Module name with the manifest's casing.
    pub name: String,
    /// Module version from the manifest.
    pub version: String,
    /// Canonical source directory.
    pub source: PathBuf,
    /// `<module root>/<name>/<version>`.
    pub target: PathBuf,
    /// Paths left out of the copy.
    pub exclusions: ExclusionSet,
    actions: Vec<Action>,
}

impl InstallPlan {
    pub(super) const fn new(
        name: String,
        version: String,
        source: PathBuf,
        target: PathBuf,
        exclusions: ExclusionSet,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            name,
            version,
            source,
            target,
            exclusions,
            actions,
        }
    }

    /// Actions in execution order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// `Name_Version`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    /// `true` if the plan replaces an existing install.
    #[must_use]
    pub fn replaces_existing(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, Action::RemoveDir(_)))
    }

    /// Number of files that will be copied.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::CopyFile(_)))
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> InstallPlan {
        InstallPlan::new(
            "Foo".to_string(),
            "1.0.0".to_string(),
            PathBuf::from("/src/Foo"),
            PathBuf::from("/mods/Foo/1.0.0"),
            ExclusionSet::default(),
            vec![
                Action::remove_dir(PathBuf::from("/mods/Foo/1.0.0")),
                Action::create_dir(PathBuf::from("/mods/Foo/1.0.0")),
                Action::copy_file(
                    PathBuf::from("/src/Foo/Foo.psd1"),
                    PathBuf::from("/mods/Foo/1.0.0/Foo.psd1"),
                ),
                Action::create_dir(PathBuf::from("/mods/Foo/1.0.0/lib")),
                Action::copy_file(
                    PathBuf::from("/src/Foo/lib/a.ps1"),
                    PathBuf::from("/mods/Foo/1.0.0/lib/a.ps1"),
                ),
            ],
        )
    }

    #[test]
    fn label_joins_name_and_version() {
        assert_eq!(sample().label(), "Foo_1.0.0");
    }

    #[test]
    fn counts_copies_and_detects_replacement() {
        let plan = sample();
        assert!(plan.replaces_existing());
        assert_eq!(plan.file_count(), 2);
    }

    #[test]
    fn fresh_install_does_not_replace() {
        let plan = InstallPlan::new(
            "Foo".to_string(),
            "1.0.0".to_string(),
            PathBuf::from("/src/Foo"),
            PathBuf::from("/mods/Foo/1.0.0"),
            ExclusionSet::default(),
            vec![Action::create_dir(PathBuf::from("/mods/Foo/1.0.0"))],
        );
        assert!(!plan.replaces_existing());
        assert_eq!(plan.file_count(), 0);
    }

    #[test]
    fn action_description_delegates() {
        let a = Action::create_dir(PathBuf::from("/t"));
        assert_eq!(a.description(), "create directory /t");
    }
}
