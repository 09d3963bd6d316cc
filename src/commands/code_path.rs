//! Commands: `set-code-path` and `get-code-path`.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::CommandSetup;
use crate::cli::SetCodePathOpts;
use crate::config::CODE_PATH_KEY;
use crate::logging::Log;

/// Persist the code path.
///
/// Relative paths are made absolute against the current directory before
/// they are stored.
///
/// # Errors
///
/// Returns an error if the settings document cannot be read or written.
pub fn set(setup: &CommandSetup, opts: &SetCodePathOpts, log: &dyn Log) -> Result<()> {
    let store = setup.store()?;
    let path = std::path::absolute(&opts.path)
        .with_context(|| format!("resolving {}", opts.path.display()))?;

    if setup.global.dry_run {
        log.dry_run(&format!(
            "would set {CODE_PATH_KEY} to {} in {}",
            path.display(),
            store.path().display()
        ));
        return Ok(());
    }

    store.set_code_path(&path, log)?;
    log.info(&format!("{CODE_PATH_KEY}: {}", path.display()));
    Ok(())
}

/// Read and validate the stored code path.
///
/// # Errors
///
/// Returns an error if the document is missing, the key is unset, or the
/// stored path no longer exists.
pub fn get(setup: &CommandSetup) -> Result<PathBuf> {
    Ok(setup.store()?.get_code_path()?)
}

/// Print the stored code path to stdout.
///
/// # Errors
///
/// See [`get`].
pub fn run_get(setup: &CommandSetup) -> Result<()> {
    let path = get(setup)?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::GlobalOpts;
    use crate::error::ConfigError;
    use crate::logging::MemoryLog;
    use crate::platform::{Env, Os, Platform};

    fn setup_in(dir: &tempfile::TempDir, dry_run: bool) -> CommandSetup {
        let global = GlobalOpts {
            dry_run,
            config: Some(dir.path().join("settings.json")),
            ..GlobalOpts::default()
        };
        CommandSetup::new(&global, Platform::new(Os::Linux, Env::default()))
    }

    #[test]
    fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(&dir, false);
        let opts = SetCodePathOpts {
            path: dir.path().to_path_buf(),
        };

        set(&setup, &opts, &MemoryLog::new()).unwrap();

        assert_eq!(get(&setup).unwrap(), dir.path());
    }

    #[test]
    fn dry_run_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(&dir, true);
        let log = MemoryLog::new();
        let opts = SetCodePathOpts {
            path: dir.path().to_path_buf(),
        };

        set(&setup, &opts, &log).unwrap();

        assert!(!dir.path().join("settings.json").exists());
        assert_eq!(log.dry_runs().len(), 1);
    }

    #[test]
    fn get_without_document_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = get(&setup_in(&dir, false)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::DocumentMissing { .. })
        ));
    }
}
