//! Command: install a module into the user module directory.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::CommandSetup;
use crate::cli::InstallOpts;
use crate::error::InstallError;
use crate::install::{self, ApplyStats, Installer, Prompter, StdinPrompter};
use crate::logging::Log;

/// What an install run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// `Name_Version` of the module.
    pub label: String,
    /// Directory the module was (or would be) installed into.
    pub target: PathBuf,
    /// Per-action counters.
    pub stats: ApplyStats,
}

/// Run the install command from the current directory.
///
/// # Errors
///
/// Returns an error if the source cannot be resolved, planning fails, or a
/// copy fails.
pub fn run(setup: &CommandSetup, opts: &InstallOpts, log: &dyn Log) -> Result<()> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    install(setup, opts, &cwd, &StdinPrompter, log).map(|_| ())
}

/// Install a module.
///
/// With a name the source is `<code path>/<name>`; without one it is `cwd`
/// and the name is `cwd`'s directory name.
///
/// # Errors
///
/// See [`run`].
pub fn install(
    setup: &CommandSetup,
    opts: &InstallOpts,
    cwd: &Path,
    prompter: &dyn Prompter,
    log: &dyn Log,
) -> Result<InstallOutcome> {
    let (source, name) = resolve_source(setup, opts.name.as_deref(), cwd)?;
    let installer = Installer::new(setup.module_root()?);

    log.stage(&format!("Installing {name}"));
    log.debug(&format!("source: {}", source.display()));
    log.debug(&format!("module root: {}", installer.module_root().display()));

    let plan = installer.plan(&source, &name, opts.force, log)?;
    log.info(&format!(
        "{} -> {} ({} file(s), {} excluded)",
        plan.label(),
        plan.target.display(),
        plan.file_count(),
        plan.exclusions.len()
    ));

    if plan.replaces_existing() {
        log.info(&format!("replacing existing install {}", plan.target.display()));
    }

    let gate = setup.gate(prompter);
    let stats = install::apply(&plan, gate, log)?;
    log.info(&stats.summary(gate.is_dry_run()));

    let label = plan.label();
    if gate.is_dry_run() {
        log.dry_run(&format!("would install {label}"));
    } else {
        log.info(&format!("installed {label}"));
    }

    Ok(InstallOutcome {
        label,
        target: plan.target,
        stats,
    })
}

/// Work out the source directory and the requested module name.
fn resolve_source(
    setup: &CommandSetup,
    name: Option<&str>,
    cwd: &Path,
) -> Result<(PathBuf, String)> {
    if let Some(name) = name {
        let code_path = setup.store()?.get_code_path()?;
        return Ok((code_path.join(name), name.to_string()));
    }
    let source = dunce::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| InstallError::InvalidSource {
            path: source.clone(),
        })?;
    Ok((source, name))
}
