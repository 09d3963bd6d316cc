//! Applying a plan: for real, as a dry run, or one confirmed action at a time.
use anyhow::{Context as _, Result};
use std::io::{BufRead as _, Write as _};

use super::plan::InstallPlan;
use crate::logging::Log;
use crate::resources::{Applicable, ResourceChange};

/// Asks whether a single action may run.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Return `true` to run the action described by `action`.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&self, action: &str) -> std::io::Result<bool>;
}

/// Prompts on stderr and reads a `y`/`n` answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, action: &str) -> std::io::Result<bool> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{action}? [y/N] ")?;
        stderr.flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// How a plan's actions are let through.
#[derive(Clone, Copy)]
pub enum Gate<'a> {
    /// Run every action.
    Apply,
    /// Run nothing; report each action as `would ...`.
    DryRun,
    /// Ask before each action and skip the ones declined.
    Confirm(&'a dyn Prompter),
}

impl Gate<'_> {
    /// `true` for [`Gate::DryRun`].
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

impl std::fmt::Debug for Gate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apply => write!(f, "Apply"),
            Self::DryRun => write!(f, "DryRun"),
            Self::Confirm(_) => write!(f, "Confirm"),
        }
    }
}

/// Counters for one plan application.
///
/// # Examples
///
/// ```
/// use psmod_cli::install::ApplyStats;
///
/// let stats = ApplyStats { changed: 5, already_ok: 1, skipped: 0 };
/// assert_eq!(stats.summary(false), "5 changed, 1 already ok");
/// assert_eq!(stats.summary(true), "5 would change, 1 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// Actions applied (or that would be, in a dry run).
    pub changed: u32,
    /// Actions that found their resource already in place.
    pub already_ok: u32,
    /// Actions declined or skipped.
    pub skipped: u32,
}

impl ApplyStats {
    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }
}

/// Run `plan` through `gate`.
///
/// Actions run in plan order. The first failure aborts; earlier changes
/// stay in place.
///
/// # Errors
///
/// Returns an error if an action fails or a confirmation cannot be read.
pub fn apply(plan: &InstallPlan, gate: Gate<'_>, log: &dyn Log) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();
    for action in plan.actions() {
        let description = action.description();
        match gate {
            Gate::DryRun => {
                log.dry_run(&format!("would {description}"));
                stats.changed += 1;
                continue;
            }
            Gate::Confirm(prompter) => {
                let approved = prompter
                    .confirm(&description)
                    .context("reading confirmation")?;
                if !approved {
                    log.info(&format!("skipped: {description}"));
                    stats.skipped += 1;
                    continue;
                }
            }
            Gate::Apply => {}
        }

        match action.apply()? {
            ResourceChange::Applied => {
                log.debug(&description);
                stats.changed += 1;
            }
            ResourceChange::AlreadyCorrect => stats.already_ok += 1,
        }
    }
    Ok(stats)
}
