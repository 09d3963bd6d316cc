pub mod code_path;
pub mod install;
pub mod stubs;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::{self, ConfigStore};
use crate::install::{Gate, Prompter};
use crate::platform::Platform;

/// Shared state produced by the common command setup sequence.
///
/// Resolves the settings document and module root from the global options
/// and the platform, so each command does not repeat the lookup.
#[derive(Debug, Clone)]
pub struct CommandSetup {
    /// Platform used for default locations.
    pub platform: Platform,
    /// Global CLI options.
    pub global: GlobalOpts,
}

impl CommandSetup {
    /// Capture the platform and the global options.
    #[must_use]
    pub fn new(global: &GlobalOpts, platform: Platform) -> Self {
        Self {
            platform,
            global: global.clone(),
        }
    }

    /// Open the settings store.
    ///
    /// # Errors
    ///
    /// Returns an error if no settings location can be determined.
    pub fn store(&self) -> Result<ConfigStore> {
        Ok(config::open_store(
            self.global.config.as_deref(),
            &self.platform,
        )?)
    }

    /// Directory modules are installed into.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `--module-root` nor a platform default is
    /// available.
    pub fn module_root(&self) -> Result<PathBuf> {
        self.global
            .module_root
            .clone()
            .or_else(|| self.platform.user_module_root())
            .context("cannot determine module root. Use --module-root or set PSMOD_MODULE_ROOT")
    }

    /// The gate selected by `--dry-run` / `--confirm-each`.
    #[must_use]
    pub fn gate<'a>(&self, prompter: &'a dyn Prompter) -> Gate<'a> {
        if self.global.dry_run {
            Gate::DryRun
        } else if self.global.confirm_each {
            Gate::Confirm(prompter)
        } else {
            Gate::Apply
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::install::StdinPrompter;
    use crate::platform::{Env, Os};
    use std::path::Path;

    fn linux_home() -> Platform {
        Platform::new(
            Os::Linux,
            Env {
                home: Some(PathBuf::from("/home/ada")),
                ..Env::default()
            },
        )
    }

    #[test]
    fn module_root_prefers_override() {
        let global = GlobalOpts {
            module_root: Some(PathBuf::from("/mods")),
            ..GlobalOpts::default()
        };
        let setup = CommandSetup::new(&global, linux_home());
        assert_eq!(setup.module_root().unwrap(), PathBuf::from("/mods"));
    }

    #[test]
    fn module_root_falls_back_to_platform() {
        let setup = CommandSetup::new(&GlobalOpts::default(), linux_home());
        assert_eq!(
            setup.module_root().unwrap(),
            PathBuf::from("/home/ada/.local/share/powershell/Modules")
        );
    }

    #[test]
    fn module_root_errors_without_home() {
        let setup = CommandSetup::new(
            &GlobalOpts::default(),
            Platform::new(Os::Linux, Env::default()),
        );
        assert!(setup.module_root().is_err());
    }

    #[test]
    fn store_uses_config_override() {
        let global = GlobalOpts {
            config: Some(PathBuf::from("/tmp/psmod.json")),
            ..GlobalOpts::default()
        };
        let setup = CommandSetup::new(&global, linux_home());
        assert_eq!(setup.store().unwrap().path(), Path::new("/tmp/psmod.json"));
    }

    #[test]
    fn gate_follows_flags() {
        let prompter = StdinPrompter;
        let plain = CommandSetup::new(&GlobalOpts::default(), linux_home());
        assert!(matches!(plain.gate(&prompter), Gate::Apply));

        let dry = CommandSetup::new(
            &GlobalOpts {
                dry_run: true,
                ..GlobalOpts::default()
            },
            linux_home(),
        );
        assert!(dry.gate(&prompter).is_dry_run());

        let confirm = CommandSetup::new(
            &GlobalOpts {
                confirm_each: true,
                ..GlobalOpts::default()
            },
            linux_home(),
        );
        assert!(matches!(confirm.gate(&prompter), Gate::Confirm(_)));
    }
}
